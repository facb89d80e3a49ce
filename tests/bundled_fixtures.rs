//! Integration tests against the bundled `eleve` fixture set.
//!
//! The set has eight products across WOMEN, MEN and KIDS priced from $95 to
//! $680, with dedicated reviews for products 1 and 2 and a default set for
//! the rest.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use eleve::{
    fixtures::Fixture,
    listing,
    prelude::*,
    reviews::{ReviewSummary, displayed},
};

#[test]
fn bundled_catalog_loads() -> TestResult {
    let fixture = Fixture::from_set("eleve")?;
    let catalog = fixture.catalog()?;

    assert_eq!(catalog.len(), 8);
    assert_eq!(catalog.currency(), USD);
    assert_eq!(catalog.categories(), vec!["WOMEN", "MEN", "KIDS"]);

    let bounds = catalog.price_bounds();

    assert_eq!(bounds.low(), Money::from_minor(9_500, USD));
    assert_eq!(bounds.high(), Money::from_minor(68_000, USD));

    Ok(())
}

#[test]
fn newest_puts_new_arrivals_first_in_catalog_order() -> TestResult {
    let fixture = Fixture::from_set("eleve")?;
    let catalog = fixture.catalog()?;

    let newest = catalog.query(&catalog.filter(), SortOrder::Newest);
    let ids = newest.iter().map(|product| product.id.0).collect::<Vec<_>>();

    assert_eq!(ids, vec![1, 5, 6, 2, 3, 4, 7, 8]);

    Ok(())
}

#[test]
fn price_sorts_mirror_each_other() -> TestResult {
    let fixture = Fixture::from_set("eleve")?;
    let catalog = fixture.catalog()?;
    let filter = catalog.filter();

    let mut low = catalog.query(&filter, SortOrder::PriceLow);
    let high = catalog.query(&filter, SortOrder::PriceHigh);

    low.reverse();

    assert_eq!(low, high);

    Ok(())
}

#[test]
fn product_reviews_fall_back_to_defaults() -> TestResult {
    let fixture = Fixture::from_set("eleve")?;

    let dress = fixture.reviews().for_product(ProductId(1));
    let summary = ReviewSummary::from_reviews(dress);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.average, Decimal::new(47, 1));
    assert_eq!(displayed(dress, false).len(), 2);

    let boots = fixture.reviews().for_product(ProductId(4));

    assert_eq!(boots.first().map(|review| review.author.as_str()), Some("Alexandra P."));

    Ok(())
}

#[test]
fn listing_renders_filtered_products() -> TestResult {
    let fixture = Fixture::from_set("eleve")?;
    let catalog = fixture.catalog()?;
    let filter = catalog.filter().with_category("KIDS");

    let mut out = Vec::new();
    listing::write_products(&mut out, &catalog.query(&filter, SortOrder::PriceLow))?;
    let output = String::from_utf8(out)?;

    assert!(output.contains("Cotton Knit Cardigan"));
    assert!(output.contains("Quilted Puffer Jacket"));
    assert!(!output.contains("Silk Midi Dress"));
    assert!(output.trim_end().ends_with("2 products"));

    Ok(())
}
