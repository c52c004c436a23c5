//! End-to-end behaviour of the catalog + resolver pair.

use gamevault::prelude::*;
use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;
use uuid::Uuid;

fn ts(value: &str) -> TestResult<Timestamp> {
    Ok(value.parse()?)
}

fn march_window() -> TestResult<ActiveWindow> {
    Ok(ActiveWindow::new(
        ts("2026-03-01T00:00:00Z")?,
        ts("2026-03-31T23:59:59Z")?,
    )?)
}

fn promotion(
    name: &str,
    discount: DiscountRule<'static>,
    scope: PromotionScope,
    window: ActiveWindow,
    enabled: bool,
    created_at: &str,
) -> TestResult<Promotion<'static>> {
    Ok(Promotion::new(
        Uuid::now_v7(),
        name,
        discount,
        scope,
        window,
        enabled,
        ts(created_at)?,
    ))
}

#[test]
fn percentage_beats_smaller_fixed_discount() -> TestResult {
    let game = Uuid::now_v7();

    // 59.99 with 25% off (44.99) against $10 off (49.99).
    let percentage = promotion(
        "Spring Sale",
        DiscountRule::percentage_off(Decimal::from(25))?,
        PromotionScope::for_games([game]),
        march_window()?,
        true,
        "2026-02-01T00:00:00Z",
    )?;
    let fixed = promotion(
        "Ten Off",
        DiscountRule::amount_off(Money::from_minor(1000, USD))?,
        PromotionScope::for_games([game]),
        march_window()?,
        true,
        "2026-02-02T00:00:00Z",
    )?;

    let winner = percentage.id();
    let catalog: PromotionCatalog<'_> = [fixed, percentage].into_iter().collect();
    let resolver = PricingResolver::new(&catalog);

    let quote = resolver.quote(
        game,
        Money::from_minor(5999, USD),
        None,
        ts("2026-03-15T12:00:00Z")?,
    )?;

    assert_eq!(quote.base_price, Money::from_minor(5999, USD));
    assert_eq!(quote.final_price, Money::from_minor(4499, USD));
    assert_eq!(quote.applied_promotion, Some(winner));

    Ok(())
}

#[test]
fn future_promotion_is_not_a_candidate() -> TestResult {
    let game = Uuid::now_v7();

    let upcoming = promotion(
        "Summer Sale",
        DiscountRule::percentage_off(Decimal::from(50))?,
        PromotionScope::for_games([game]),
        ActiveWindow::new(ts("2026-06-01T00:00:00Z")?, ts("2026-06-30T00:00:00Z")?)?,
        true,
        "2026-02-01T00:00:00Z",
    )?;

    let catalog = PromotionCatalog::new(vec![upcoming]);
    let resolver = PricingResolver::new(&catalog);

    let quote = resolver.quote(
        game,
        Money::from_minor(5999, USD),
        None,
        ts("2026-03-15T12:00:00Z")?,
    )?;

    assert_eq!(quote.final_price, Money::from_minor(5999, USD));
    assert_eq!(quote.applied_promotion, None);

    Ok(())
}

#[test]
fn manual_flag_overrides_date_window() -> TestResult {
    let game = Uuid::now_v7();

    let paused = promotion(
        "Paused Sale",
        DiscountRule::percentage_off(Decimal::from(50))?,
        PromotionScope::for_games([game]),
        march_window()?,
        false,
        "2026-02-01T00:00:00Z",
    )?;

    let catalog = PromotionCatalog::new(vec![paused]);
    let resolver = PricingResolver::new(&catalog);

    let quote = resolver.quote(
        game,
        Money::from_minor(5999, USD),
        None,
        ts("2026-03-15T12:00:00Z")?,
    )?;

    assert_eq!(quote.final_price, Money::from_minor(5999, USD));
    assert_eq!(quote.applied_promotion, None);

    Ok(())
}

#[test]
fn category_scope_reaches_games_in_that_category() -> TestResult {
    let game = Uuid::now_v7();
    let category = Uuid::now_v7();

    let category_wide = promotion(
        "RPG Week",
        DiscountRule::percentage_off(Decimal::from(20))?,
        PromotionScope::for_categories([category]),
        march_window()?,
        true,
        "2026-02-01T00:00:00Z",
    )?;

    let catalog = PromotionCatalog::new(vec![category_wide]);
    let resolver = PricingResolver::new(&catalog);

    let now = ts("2026-03-15T12:00:00Z")?;

    let in_category = resolver.quote(game, Money::from_minor(5000, USD), Some(category), now)?;
    assert_eq!(in_category.final_price, Money::from_minor(4000, USD));

    let uncategorised = resolver.quote(game, Money::from_minor(5000, USD), None, now)?;
    assert_eq!(uncategorised.final_price, Money::from_minor(5000, USD));
    assert_eq!(uncategorised.applied_promotion, None);

    Ok(())
}

#[test]
fn quoting_is_idempotent() -> TestResult {
    let game = Uuid::now_v7();

    let percentage = promotion(
        "Spring Sale",
        DiscountRule::percentage_off(Decimal::from(25))?,
        PromotionScope::for_games([game]),
        march_window()?,
        true,
        "2026-02-01T00:00:00Z",
    )?;

    let catalog = PromotionCatalog::new(vec![percentage]);
    let resolver = PricingResolver::new(&catalog);
    let now = ts("2026-03-15T12:00:00Z")?;

    let first = resolver.quote(game, Money::from_minor(5999, USD), None, now)?;
    let second = resolver.quote(game, Money::from_minor(5999, USD), None, now)?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn final_price_never_leaves_zero_to_base_range() -> TestResult {
    let game = Uuid::now_v7();
    let now = ts("2026-03-15T12:00:00Z")?;

    let discounts = [
        DiscountRule::percentage_off(Decimal::from(1))?,
        DiscountRule::percentage_off(Decimal::from(100))?,
        DiscountRule::amount_off(Money::from_minor(1, USD))?,
        DiscountRule::amount_off(Money::from_minor(1_000_000, USD))?,
    ];

    for (index, discount) in discounts.into_iter().enumerate() {
        let single = promotion(
            "Bound Check",
            discount,
            PromotionScope::for_games([game]),
            march_window()?,
            true,
            "2026-02-01T00:00:00Z",
        )?;

        let catalog = PromotionCatalog::new(vec![single]);
        let resolver = PricingResolver::new(&catalog);

        for base in [0, 1, 99, 5999] {
            let quote = resolver.quote(game, Money::from_minor(base, USD), None, now)?;

            let final_minor = quote.final_price.to_minor_units();

            assert!(
                (0..=base).contains(&final_minor),
                "discount {index}: final {final_minor} outside 0..={base}"
            );
        }
    }

    Ok(())
}

#[test]
fn candidates_are_compared_unrounded() -> TestResult {
    let game = Uuid::now_v7();

    // 50% of 10.01 is 5.005; $5.00 off is 5.01. The percentage wins on the
    // unrounded value, then its price alone rounds half-even to 5.00.
    let percentage = promotion(
        "Half Price",
        DiscountRule::percentage_off(Decimal::from(50))?,
        PromotionScope::for_games([game]),
        march_window()?,
        true,
        "2026-02-02T00:00:00Z",
    )?;
    let fixed = promotion(
        "Five Off",
        DiscountRule::amount_off(Money::from_minor(500, USD))?,
        PromotionScope::for_games([game]),
        march_window()?,
        true,
        "2026-02-01T00:00:00Z",
    )?;

    let winner = percentage.id();
    let catalog = PromotionCatalog::new(vec![fixed, percentage]);
    let resolver = PricingResolver::new(&catalog);

    let quote = resolver.quote(
        game,
        Money::from_minor(1001, USD),
        None,
        ts("2026-03-15T12:00:00Z")?,
    )?;

    assert_eq!(quote.applied_promotion, Some(winner));
    assert_eq!(quote.final_price, Money::from_minor(500, USD));

    Ok(())
}

#[test]
fn fixture_defined_promotions_price_as_expected() -> TestResult {
    let game: Uuid = "018f6a2e-0000-7000-8000-00000000000a".parse()?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storewide.yml");

    std::fs::write(
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
  ten_off:
    id: 018f6a2e-0000-7000-8000-000000000002
    name: Ten Off
    discount:
      type: amount_off
      value: "10.00 USD"
    games:
      - 018f6a2e-0000-7000-8000-00000000000a
    starts_at: 2026-03-01T00:00:00Z
    ends_at: 2026-03-31T23:59:59Z
    created_at: 2026-02-02T00:00:00Z
"#,
    )?;

    let catalog = PromotionsFixture::from_path(&path)?.try_into_catalog()?;
    let resolver = PricingResolver::new(&catalog);

    let quote = resolver.quote(
        game,
        Money::from_minor(5999, USD),
        None,
        ts("2026-03-15T12:00:00Z")?,
    )?;

    assert_eq!(quote.final_price, Money::from_minor(4499, USD));
    assert_eq!(
        quote.applied_promotion,
        Some("018f6a2e-0000-7000-8000-000000000001".parse()?)
    );

    Ok(())
}
