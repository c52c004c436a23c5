//! Pricing
//!
//! Turns a base price and a set of candidate promotions into one
//! deterministic final price.

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use uuid::Uuid;

use crate::{catalog::PromotionCatalog, discounts::DiscountError, promotions::Promotion};

/// Errors raised while quoting a price.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The caller passed a negative base price.
    #[error("base price cannot be negative")]
    NegativeBasePrice,

    /// A candidate discount could not be applied.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// The outcome of pricing one game at one point in time. Ephemeral; nothing
/// is recorded until the checkout collaborator completes a sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote<'a> {
    /// The game that was priced.
    pub game_id: Uuid,

    /// The undiscounted catalog price.
    pub base_price: Money<'a, Currency>,

    /// The price after the winning discount, if any.
    pub final_price: Money<'a, Currency>,

    /// The promotion that produced `final_price`, when one applied.
    pub applied_promotion: Option<Uuid>,
}

impl<'a> PriceQuote<'a> {
    /// Whether a promotion lowered the price.
    pub fn is_discounted(&self) -> bool {
        self.applied_promotion.is_some()
    }

    /// The amount the buyer saves against the base price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the two prices somehow disagree on
    /// currency; quotes built by the resolver never do.
    pub fn saving(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.base_price.sub(self.final_price)
    }
}

/// Selects the single best applicable discount for a game.
///
/// Pure and side-effect free: quoting the same `(game, base price, category,
/// now)` tuple against unchanged promotion state always yields the same
/// result, however many times it is called.
#[derive(Debug, Clone, Copy)]
pub struct PricingResolver<'c, 'a> {
    catalog: &'c PromotionCatalog<'a>,
}

impl<'c, 'a> PricingResolver<'c, 'a> {
    /// Build a resolver over a promotion catalog.
    pub fn new(catalog: &'c PromotionCatalog<'a>) -> Self {
        Self { catalog }
    }

    /// Quote the price of a game at `now`.
    ///
    /// Every candidate promotion's price is computed unrounded and floored
    /// at zero; the lowest one wins, with ties going to the promotion
    /// created first. The winning price alone is rounded, half-even, to the
    /// currency's minor-unit precision. Candidates that fail to beat the
    /// base price apply no promotion.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::NegativeBasePrice`] for a negative base price;
    /// money arithmetic failures surface as [`QuoteError::Discount`].
    pub fn quote(
        &self,
        game_id: Uuid,
        base_price: Money<'a, Currency>,
        category_id: Option<Uuid>,
        now: Timestamp,
    ) -> Result<PriceQuote<'a>, QuoteError> {
        if base_price.to_minor_units() < 0 {
            return Err(QuoteError::NegativeBasePrice);
        }

        let base_minor = Decimal::from(base_price.to_minor_units());
        let mut best: Option<(Decimal, &Promotion<'a>)> = None;

        for promotion in self.catalog.candidates_for(game_id, category_id, now) {
            let candidate = promotion.discount().candidate_minor_units(&base_price)?;

            let wins = match best {
                None => candidate < base_minor,
                Some((best_minor, incumbent)) => {
                    candidate < best_minor
                        || (candidate == best_minor && created_before(promotion, incumbent))
                }
            };

            if wins {
                best = Some((candidate, promotion));
            }
        }

        let Some((winning_minor, promotion)) = best else {
            return Ok(PriceQuote {
                game_id,
                base_price,
                final_price: base_price,
                applied_promotion: None,
            });
        };

        let rounded = winning_minor.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        let final_minor = rounded.to_i64().ok_or(DiscountError::MinorConversion)?;

        Ok(PriceQuote {
            game_id,
            base_price,
            final_price: Money::from_minor(final_minor, base_price.currency()),
            applied_promotion: Some(promotion.id()),
        })
    }
}

/// First-created wins; equal timestamps fall back to the promotion id so the
/// outcome never depends on candidate order.
fn created_before(a: &Promotion<'_>, b: &Promotion<'_>) -> bool {
    (a.created_at(), a.id()) < (b.created_at(), b.id())
}
