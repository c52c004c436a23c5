//! Discount rules
//!
//! The two ways a promotion can lower a price, as a single sum type so that a
//! rule is either a percentage or a fixed amount and never both.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors raised when building a discount rule from raw values.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountRuleError {
    /// Percentage was outside `(0, 100]`.
    #[error("percentage must be greater than 0 and at most 100, got {value}")]
    PercentageOutOfRange {
        /// The rejected whole-number percentage.
        value: Decimal,
    },

    /// Fixed amount was zero or negative.
    #[error("fixed discount amount must be positive, got {value}")]
    NonPositiveAmount {
        /// The rejected amount in major units.
        value: Decimal,
    },
}

/// Errors raised while applying a discount rule to a price.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// The discounted amount did not fit the currency's minor units.
    #[error("discounted amount cannot be represented in minor units")]
    MinorConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A discount applied to a game's catalog price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscountRule<'a> {
    /// Take a percentage off the base price (e.g. "25% off").
    PercentageOff(Percentage),

    /// Subtract a fixed amount from the base price (e.g. "$10.00 off").
    AmountOff(Money<'a, Currency>),
}

impl<'a> DiscountRule<'a> {
    /// Build a percentage rule from a whole-number percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountRuleError::PercentageOutOfRange`] unless
    /// `0 < percent <= 100`.
    pub fn percentage_off(percent: Decimal) -> Result<Self, DiscountRuleError> {
        if percent <= Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DiscountRuleError::PercentageOutOfRange { value: percent });
        }

        let fraction = (percent / Decimal::ONE_HUNDRED).normalize();

        // decimal_percentage constructs from floats or strings; the string
        // form keeps the fraction exact.
        let Ok(percentage) = Percentage::try_from(fraction.to_string().as_str()) else {
            return Err(DiscountRuleError::PercentageOutOfRange { value: percent });
        };

        Ok(Self::PercentageOff(percentage))
    }

    /// Build a fixed-amount rule.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountRuleError::NonPositiveAmount`] unless the amount is
    /// strictly positive.
    pub fn amount_off(amount: Money<'a, Currency>) -> Result<Self, DiscountRuleError> {
        if amount.to_minor_units() <= 0 {
            return Err(DiscountRuleError::NonPositiveAmount {
                value: Decimal::new(amount.to_minor_units(), amount.currency().exponent),
            });
        }

        Ok(Self::AmountOff(amount))
    }

    /// Candidate price for this rule in fractional minor units, floored at
    /// zero so an oversized fixed discount can never go negative.
    ///
    /// The result is deliberately left unrounded: candidates are compared on
    /// exact values and only the winning price is rounded, once.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if money arithmetic fails (for example, a
    /// currency mismatch between the amount and the base price).
    pub fn candidate_minor_units(
        &self,
        base_price: &Money<'a, Currency>,
    ) -> Result<Decimal, DiscountError> {
        let base_minor = Decimal::from(base_price.to_minor_units());

        let discounted = match self {
            Self::PercentageOff(percent) => base_minor - (*percent * base_minor),
            Self::AmountOff(amount) => Decimal::from(base_price.sub(*amount)?.to_minor_units()),
        };

        Ok(discounted.max(Decimal::ZERO))
    }
}
