//! Fixtures
//!
//! YAML-backed catalog and review data. A fixture set named `eleve` lives in
//! `catalog/eleve.yml` and `reviews/eleve.yml` under the base path.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::{catalog::CatalogFixture, reviews::ReviewsFixture},
    products::{Product, ProductId},
    reviews::ReviewBook,
};

pub mod catalog;
pub mod reviews;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,

        /// Underlying error
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Rating outside 0 to 5
    #[error("Invalid rating {rating} on review {review}")]
    InvalidRating {
        /// Review identifier
        review: u32,

        /// Rating as written
        rating: f64,
    },

    /// Reviews reference a product the catalog does not have
    #[error("Reviews reference unknown product {0}")]
    ProductNotFound(ProductId),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog validation error
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in file order
    products: Vec<Product<'a>>,

    /// Reviews by product
    reviews: ReviewBook,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            reviews: ReviewBook::default(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("catalog", name)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        for product_fixture in fixture.products {
            // Parse to get currency first (before creating Product)
            let (_minor_units, currency) = catalog::parse_price(&product_fixture.price)?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let product: Product<'a> = product_fixture.try_into()?;

            self.products.push(product);
        }

        tracing::debug!(name, products = self.products.len(), "catalog fixture loaded");

        Ok(self)
    }

    /// Load reviews from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a rating is out
    /// of range, or reviews reference a product that has not been loaded.
    pub fn load_reviews(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("reviews", name)?;
        let fixture: ReviewsFixture = serde_norway::from_str(&contents)?;

        let default = fixture
            .default
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        let mut book = ReviewBook::new(default);

        for (product_id, reviews) in fixture.products {
            let product_id = ProductId(product_id);

            if !self.products.iter().any(|product| product.id == product_id) {
                return Err(FixtureError::ProductNotFound(product_id));
            }

            let reviews = reviews
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?;

            book.insert(product_id, reviews);
        }

        self.reviews = book;

        Ok(self)
    }

    /// Load a complete fixture set (catalog and reviews with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?.load_reviews(name)?;

        Ok(fixture)
    }

    /// Build a validated catalog from the loaded products
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if no products are loaded, or a
    /// wrapped [`CatalogError`] if the products are inconsistent.
    pub fn catalog(&self) -> Result<Catalog<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        Ok(Catalog::new(self.products.iter().cloned(), currency)?)
    }

    /// Get the loaded reviews
    pub fn reviews(&self) -> &ReviewBook {
        &self.reviews
    }

    /// Get the currency for the fixture set
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    fn read(&self, kind: &str, name: &str) -> Result<String, FixtureError> {
        let path = self.base_path.join(kind).join(format!("{name}.yml"));

        fs::read_to_string(&path).map_err(|source| FixtureError::Io { path, source })
    }
}
