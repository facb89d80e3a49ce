//! Catalog
//!
//! The read-only product list every other component reads from. Products
//! keep the order they were loaded in, which is the "featured" order.

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    filters::{PriceRange, ProductFilter, SortOrder, filter_products},
    products::{Color, Product, ProductId, ProductKey},
};

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two products share an identifier.
    #[error("Duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product has no images.
    #[error("Product {0} has no images")]
    NoImages(ProductId),

    /// A product lists the same colour name twice.
    #[error("Product {0} lists colour {1} more than once")]
    DuplicateColor(ProductId, String),

    /// A product has a negative price.
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),

    /// A product is priced in a currency other than the catalog's (product, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    order: Vec<ProductKey>,
    ids: FxHashMap<ProductId, ProductKey>,
    currency: &'a Currency,
}

impl<'a> Catalog<'a> {
    /// Build a catalog from products in featured order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if ids repeat, a product has no images,
    /// repeats a colour, has a negative price, or is priced in another currency.
    pub fn new(
        products: impl IntoIterator<Item = Product<'a>>,
        currency: &'a Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog {
            products: SlotMap::with_key(),
            order: Vec::new(),
            ids: FxHashMap::default(),
            currency,
        };

        for product in products {
            catalog.validate(&product)?;

            let id = product.id;
            let key = catalog.products.insert(product);

            catalog.order.push(key);
            catalog.ids.insert(id, key);
        }

        tracing::debug!(products = catalog.len(), "catalog loaded");

        Ok(catalog)
    }

    fn validate(&self, product: &Product<'a>) -> Result<(), CatalogError> {
        if self.ids.contains_key(&product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }

        if product.images.is_empty() {
            return Err(CatalogError::NoImages(product.id));
        }

        let mut seen = FxHashSet::default();

        if let Some(color) = product
            .colors
            .iter()
            .find(|color| !seen.insert(color.name.as_str()))
        {
            return Err(CatalogError::DuplicateColor(product.id, color.name.clone()));
        }

        for price in std::iter::once(&product.price).chain(product.original_price.as_ref()) {
            if price.currency() != self.currency {
                return Err(CatalogError::CurrencyMismatch(
                    product.id,
                    price.currency().iso_alpha_code,
                    self.currency.iso_alpha_code,
                ));
            }

            if price.to_minor_units() < 0 {
                return Err(CatalogError::NegativePrice(product.id));
            }
        }

        Ok(())
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product<'a>> {
        self.ids.get(&id).and_then(|key| self.products.get(*key))
    }

    /// Iterate over products in featured order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();

        self.iter()
            .map(|product| product.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Distinct colours, unique by name, in first-seen order.
    pub fn colors(&self) -> Vec<&Color> {
        let mut seen = FxHashSet::default();

        self.iter()
            .flat_map(|product| product.colors.iter())
            .filter(|color| seen.insert(color.name.as_str()))
            .collect()
    }

    /// Lowest and highest price across the whole catalog.
    ///
    /// An empty catalog has zero bounds.
    pub fn price_bounds(&self) -> PriceRange<'a> {
        let minors = self.iter().map(|product| product.price.to_minor_units());

        let (low, high) = minors.fold(None, |acc: Option<(i64, i64)>, minor| match acc {
            Some((low, high)) => Some((low.min(minor), high.max(minor))),
            None => Some((minor, minor)),
        })
        .unwrap_or((0, 0));

        PriceRange::new(
            Money::from_minor(low, self.currency),
            Money::from_minor(high, self.currency),
        )
    }

    /// A filter with nothing selected and the full price range.
    pub fn filter(&self) -> ProductFilter<'a> {
        ProductFilter::new(self.price_bounds())
    }

    /// Products matching `filter`, in `sort` order.
    pub fn query(&self, filter: &ProductFilter<'_>, sort: SortOrder) -> Vec<&Product<'a>> {
        filter_products(self.iter(), filter, sort)
    }

    /// Get the number of products.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get the currency every product is priced in.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
