//! GameVault prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::PromotionCatalog,
    discounts::{DiscountError, DiscountRule, DiscountRuleError},
    fixtures::{DiscountFixtureConfig, FixtureError, PromotionFixture, PromotionsFixture},
    pricing::{PriceQuote, PricingResolver, QuoteError},
    promotions::{ActiveWindow, Promotion, PromotionScope, WindowError},
};
