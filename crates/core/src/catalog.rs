//! Promotion Catalog
//!
//! A read-only collection of promotion definitions that answers "which
//! promotions could discount this game right now".

use jiff::Timestamp;
use uuid::Uuid;

use crate::promotions::Promotion;

/// An in-memory, read-only set of promotion definitions.
#[derive(Debug, Clone, Default)]
pub struct PromotionCatalog<'a> {
    promotions: Vec<Promotion<'a>>,
}

impl<'a> PromotionCatalog<'a> {
    /// Build a catalog from promotion definitions.
    pub fn new(promotions: Vec<Promotion<'a>>) -> Self {
        Self { promotions }
    }

    /// Promotions eligible to discount the given game at `now`: currently
    /// active (manual flag on, inside the window) and in scope.
    ///
    /// No ordering is guaranteed; tie-breaking belongs to the resolver.
    /// Yields nothing when no promotion matches.
    pub fn candidates_for(
        &self,
        game_id: Uuid,
        category_id: Option<Uuid>,
        now: Timestamp,
    ) -> impl Iterator<Item = &Promotion<'a>> {
        self.promotions
            .iter()
            .filter(move |promotion| {
                promotion.is_active_at(now) && promotion.applies_to(game_id, category_id)
            })
    }

    /// Every promotion in the catalog, active or not.
    pub fn promotions(&self) -> &[Promotion<'a>] {
        &self.promotions
    }

    /// Number of promotions held.
    pub fn len(&self) -> usize {
        self.promotions.len()
    }

    /// Whether the catalog holds no promotions at all.
    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }
}

impl<'a> FromIterator<Promotion<'a>> for PromotionCatalog<'a> {
    fn from_iter<I: IntoIterator<Item = Promotion<'a>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
