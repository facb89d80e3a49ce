//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::FixtureError,
    products::{Color, Product, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in featured order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Category label
    pub category: String,

    /// Long-form description
    #[serde(default)]
    pub description: String,

    /// Material composition
    #[serde(default)]
    pub material: String,

    /// Product price (e.g., "295 USD")
    pub price: String,

    /// Pre-discount price (e.g., "350 USD")
    #[serde(default)]
    pub original_price: Option<String>,

    /// Image URIs
    pub images: Vec<String>,

    /// Available colours
    pub colors: Vec<Color>,

    /// Available sizes
    pub sizes: Vec<String>,

    /// "NEW" badge
    #[serde(default)]
    pub is_new: bool,

    /// "BESTSELLER" badge
    #[serde(default)]
    pub is_bestseller: bool,

    /// Bullet-point details
    #[serde(default)]
    pub details: Vec<String>,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_money(&fixture.price)?;

        let original_price = fixture
            .original_price
            .as_deref()
            .map(parse_money)
            .transpose()?;

        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            category: fixture.category,
            description: fixture.description,
            material: fixture.material,
            price,
            original_price,
            images: fixture.images,
            colors: SmallVec::from_vec(fixture.colors),
            sizes: SmallVec::from_vec(fixture.sizes),
            is_new: fixture.is_new,
            is_bestseller: fixture.is_bestseller,
            details: fixture.details,
        })
    }
}

fn parse_money(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
