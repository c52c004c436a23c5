//! Money conversions at the storage boundary
//!
//! Prices are NUMERIC in PostgreSQL and currency-tagged money inside the
//! pricing engine. GameVault sells in a single currency.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};

/// The currency every price in the store is denominated in.
pub static STORE_CURRENCY: &iso::Currency = iso::USD;

/// Convert a stored NUMERIC amount into store-currency money.
///
/// Returns `None` when the amount carries more precision than the currency's
/// minor unit, or does not fit it.
pub(crate) fn money_from_decimal(amount: Decimal) -> Option<Money<'static, iso::Currency>> {
    let scale = 10_i64.checked_pow(STORE_CURRENCY.exponent)?;
    let minor = amount * Decimal::from(scale);

    if minor.fract() != Decimal::ZERO {
        return None;
    }

    Some(Money::from_minor(minor.to_i64()?, STORE_CURRENCY))
}

/// Convert store-currency money back into a NUMERIC amount.
pub(crate) fn decimal_from_money(money: Money<'_, iso::Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), STORE_CURRENCY.exponent)
}
