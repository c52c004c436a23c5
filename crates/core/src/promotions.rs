//! Promotions
//!
//! A promotion is a time-bounded discount rule scoped to specific games
//! and/or whole categories, with a manual on/off switch on top of its date
//! window.

use jiff::Timestamp;
use rustc_hash::FxHashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::discounts::DiscountRule;

/// Errors raised when building a promotion's active window.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    /// `start_at` does not precede `end_at`.
    #[error("promotion window must start before it ends")]
    EmptyWindow,
}

/// The period a promotion is live, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    start_at: Timestamp,
    end_at: Timestamp,
}

impl ActiveWindow {
    /// Build a window from its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::EmptyWindow`] unless `start_at < end_at`.
    pub fn new(start_at: Timestamp, end_at: Timestamp) -> Result<Self, WindowError> {
        if start_at >= end_at {
            return Err(WindowError::EmptyWindow);
        }

        Ok(Self { start_at, end_at })
    }

    /// Window start.
    pub fn start_at(&self) -> Timestamp {
        self.start_at
    }

    /// Window end.
    pub fn end_at(&self) -> Timestamp {
        self.end_at
    }

    /// Whether `now` falls inside the window, bounds included.
    pub fn contains(&self, now: Timestamp) -> bool {
        self.start_at <= now && now <= self.end_at
    }
}

/// The games and/or categories a promotion is allowed to discount.
///
/// Scope is a union: a promotion targets a game if the game is listed
/// directly or its category is. An empty scope matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionScope {
    games: FxHashSet<Uuid>,
    categories: FxHashSet<Uuid>,
}

impl PromotionScope {
    /// Build a scope over the given games and categories.
    pub fn new(
        games: impl IntoIterator<Item = Uuid>,
        categories: impl IntoIterator<Item = Uuid>,
    ) -> Self {
        Self {
            games: games.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }

    /// Scope over specific games only.
    pub fn for_games(games: impl IntoIterator<Item = Uuid>) -> Self {
        Self::new(games, [])
    }

    /// Scope over whole categories only.
    pub fn for_categories(categories: impl IntoIterator<Item = Uuid>) -> Self {
        Self::new([], categories)
    }

    /// Whether the scope targets the given game.
    pub fn matches(&self, game_id: Uuid, category_id: Option<Uuid>) -> bool {
        self.games.contains(&game_id)
            || category_id.is_some_and(|category| self.categories.contains(&category))
    }

    /// Whether the scope targets nothing at all.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty() && self.categories.is_empty()
    }
}

/// A time-bounded, scoped discount definition.
///
/// Promotions are read-only to the pricing engine; creation and editing
/// belong to the admin collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion<'a> {
    id: Uuid,
    name: String,
    discount: DiscountRule<'a>,
    scope: PromotionScope,
    window: ActiveWindow,
    enabled: bool,
    created_at: Timestamp,
}

impl<'a> Promotion<'a> {
    /// Create a promotion from already-validated parts.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        discount: DiscountRule<'a>,
        scope: PromotionScope,
        window: ActiveWindow,
        enabled: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            discount,
            scope,
            window,
            enabled,
            created_at,
        }
    }

    /// Promotion identity.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The discount this promotion applies.
    pub fn discount(&self) -> &DiscountRule<'a> {
        &self.discount
    }

    /// The games and categories this promotion targets.
    pub fn scope(&self) -> &PromotionScope {
        &self.scope
    }

    /// The window this promotion is live in.
    pub fn window(&self) -> ActiveWindow {
        self.window
    }

    /// The manual activation flag.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Creation time; earlier-created promotions win best-price ties.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Whether the promotion is live at `now`: the manual flag must be on
    /// and `now` must fall inside the window.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        self.enabled && self.window.contains(now)
    }

    /// Whether the promotion targets the given game.
    pub fn applies_to(&self, game_id: Uuid, category_id: Option<Uuid>) -> bool {
        self.scope.matches(game_id, category_id)
    }
}
