//! Promotion Fixtures
//!
//! YAML-defined promotion sets for tests and local experiments.

use std::{fs, path::Path, str::FromStr};

use jiff::Timestamp;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{Findable, Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    catalog::PromotionCatalog,
    discounts::{DiscountRule, DiscountRuleError},
    promotions::{ActiveWindow, Promotion, PromotionScope, WindowError},
};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid discount rule
    #[error(transparent)]
    InvalidDiscount(#[from] DiscountRuleError),

    /// Invalid active window
    #[error(transparent)]
    InvalidWindow(#[from] WindowError),
}

/// Wrapper for promotions in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Map of fixture key -> promotion fixture
    pub promotions: FxHashMap<String, PromotionFixture>,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
pub struct PromotionFixture {
    /// Promotion identity
    pub id: Uuid,

    /// Promotion name
    pub name: String,

    /// Discount configuration
    pub discount: DiscountFixtureConfig,

    /// Game UUIDs in scope
    #[serde(default)]
    pub games: Vec<Uuid>,

    /// Category UUIDs in scope
    #[serde(default)]
    pub categories: Vec<Uuid>,

    /// Window start
    pub starts_at: Timestamp,

    /// Window end
    pub ends_at: Timestamp,

    /// Manual activation flag
    #[serde(default = "enabled_default")]
    pub enabled: bool,

    /// Creation time; earlier-created promotions win best-price ties
    pub created_at: Timestamp,
}

fn enabled_default() -> bool {
    true
}

/// Discount configuration from YAML fixtures
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountFixtureConfig {
    /// Percentage discount (e.g. `value: 25` for 25% off)
    PercentageOff {
        /// Whole-number percentage in (0, 100]
        value: Decimal,
    },

    /// Fixed amount off (e.g. `value: "10.00 USD"`)
    AmountOff {
        /// Amount string with currency code
        value: String,
    },
}

impl TryFrom<DiscountFixtureConfig> for DiscountRule<'static> {
    type Error = FixtureError;

    fn try_from(config: DiscountFixtureConfig) -> Result<Self, Self::Error> {
        match config {
            DiscountFixtureConfig::PercentageOff { value } => {
                Ok(DiscountRule::percentage_off(value)?)
            }
            DiscountFixtureConfig::AmountOff { value } => {
                let (minor_units, currency) = parse_price(&value)?;

                Ok(DiscountRule::amount_off(Money::from_minor(
                    minor_units,
                    currency,
                ))?)
            }
        }
    }
}

impl PromotionFixture {
    /// Convert into a domain promotion.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount configuration or window is invalid.
    pub fn try_into_promotion(self) -> Result<Promotion<'static>, FixtureError> {
        let discount = DiscountRule::try_from(self.discount)?;
        let window = ActiveWindow::new(self.starts_at, self.ends_at)?;
        let scope = PromotionScope::new(self.games, self.categories);

        Ok(Promotion::new(
            self.id,
            self.name,
            discount,
            scope,
            window,
            self.enabled,
            self.created_at,
        ))
    }
}

impl PromotionsFixture {
    /// Load a fixture set from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Build a catalog from every promotion in the fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if any promotion fails conversion.
    pub fn try_into_catalog(self) -> Result<PromotionCatalog<'static>, FixtureError> {
        self.promotions
            .into_values()
            .map(PromotionFixture::try_into_promotion)
            .collect()
    }
}

/// Parse a `"2.50 USD"` style price string into minor units and a currency.
fn parse_price(value: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let Some((amount, code)) = value.split_once(' ') else {
        return Err(FixtureError::InvalidPrice(value.to_string()));
    };

    let Some(currency) = Currency::find(code) else {
        return Err(FixtureError::UnknownCurrency(code.to_string()));
    };

    let Ok(amount) = Decimal::from_str(amount) else {
        return Err(FixtureError::InvalidPrice(value.to_string()));
    };

    let Some(scale) = 10_i64.checked_pow(currency.exponent) else {
        return Err(FixtureError::InvalidPrice(value.to_string()));
    };

    let minor = amount * Decimal::from(scale);

    if minor.fract() != Decimal::ZERO {
        return Err(FixtureError::InvalidPrice(value.to_string()));
    }

    let Some(minor) = minor.to_i64() else {
        return Err(FixtureError::InvalidPrice(value.to_string()));
    };

    Ok((minor, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn discount_fixture_parses_percentage() -> Result<(), FixtureError> {
        let config = DiscountFixtureConfig::PercentageOff {
            value: Decimal::from(15),
        };

        let rule = DiscountRule::try_from(config)?;

        assert!(matches!(rule, DiscountRule::PercentageOff(_)));

        Ok(())
    }

    #[test]
    fn discount_fixture_parses_amount_off() -> Result<(), FixtureError> {
        let config = DiscountFixtureConfig::AmountOff {
            value: "10.00 USD".to_string(),
        };

        let rule = DiscountRule::try_from(config)?;

        assert!(matches!(
            rule,
            DiscountRule::AmountOff(money) if money == Money::from_minor(1000, USD)
        ));

        Ok(())
    }

    #[test]
    fn discount_fixture_rejects_unknown_currency() {
        let config = DiscountFixtureConfig::AmountOff {
            value: "10.00 ZZZ".to_string(),
        };

        let result = DiscountRule::try_from(config);

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(_))));
    }

    #[test]
    fn discount_fixture_rejects_out_of_range_percentage() {
        let config = DiscountFixtureConfig::PercentageOff {
            value: Decimal::from(101),
        };

        let result = DiscountRule::try_from(config);

        assert!(matches!(result, Err(FixtureError::InvalidDiscount(_))));
    }

    #[test]
    fn discount_fixture_rejects_sub_minor_precision() {
        let config = DiscountFixtureConfig::AmountOff {
            value: "10.005 USD".to_string(),
        };

        let result = DiscountRule::try_from(config);

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn promotions_fixture_rejects_unknown_discount_type() {
        let yaml = r"
promotions:
  mystery:
    id: 018f6a2e-0000-7000-8000-000000000001
    name: Mystery
    discount:
      type: mystery_discount
      value: 10
    starts_at: 2026-03-01T00:00:00Z
    ends_at: 2026-03-31T00:00:00Z
    created_at: 2026-02-01T00:00:00Z
";
        let result: Result<PromotionsFixture, _> = serde_norway::from_str(yaml);

        assert!(result.is_err());
    }

    #[test]
    fn promotions_fixture_loads_from_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("spring.yml");

        fs::write(
            &path,
            r#"
promotions:
  spring_sale:
    id: 018f6a2e-0000-7000-8000-000000000001
    name: Spring Sale
    discount:
      type: percentage_off
      value: 25
    games:
      - 018f6a2e-0000-7000-8000-00000000000a
    starts_at: 2026-03-01T00:00:00Z
    ends_at: 2026-03-31T23:59:59Z
    created_at: 2026-02-01T00:00:00Z
  clearance:
    id: 018f6a2e-0000-7000-8000-000000000002
    name: Clearance
    discount:
      type: amount_off
      value: "10.00 USD"
    categories:
      - 018f6a2e-0000-7000-8000-00000000000b
    starts_at: 2026-03-01T00:00:00Z
    ends_at: 2026-03-31T23:59:59Z
    enabled: false
    created_at: 2026-02-02T00:00:00Z
"#,
        )?;

        let fixture = PromotionsFixture::from_path(&path)?;

        assert_eq!(fixture.promotions.len(), 2);

        let catalog = fixture.try_into_catalog()?;

        assert_eq!(catalog.len(), 2);

        Ok(())
    }

    #[test]
    fn fixture_window_must_be_ordered() -> TestResult {
        let yaml = r"
promotions:
  backwards:
    id: 018f6a2e-0000-7000-8000-000000000003
    name: Backwards
    discount:
      type: percentage_off
      value: 10
    starts_at: 2026-03-31T00:00:00Z
    ends_at: 2026-03-01T00:00:00Z
    created_at: 2026-02-01T00:00:00Z
";
        let fixture: PromotionsFixture = serde_norway::from_str(yaml)?;
        let result = fixture.try_into_catalog();

        assert!(matches!(result, Err(FixtureError::InvalidWindow(_))));

        Ok(())
    }
}
