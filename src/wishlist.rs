//! Wishlist

use rusty_money::{Money, iso::Currency};

use crate::products::ProductId;

/// A saved product. Carries no size or colour.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItem<'a> {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name at the time of saving
    pub name: String,

    /// Price at the time of saving
    pub price: Money<'a, Currency>,

    /// Image shown in the wishlist drawer
    pub image: String,

    /// Category label
    pub category: String,
}

/// Whether a toggle saved or dropped the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    /// The product was not saved and now is.
    Added,

    /// The product was saved and now is not.
    Removed,
}

/// Wishlist
#[derive(Debug, Clone, Default)]
pub struct Wishlist<'a> {
    items: Vec<WishlistItem<'a>>,
}

impl<'a> Wishlist<'a> {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the product if absent, otherwise drop it.
    pub fn toggle(&mut self, item: WishlistItem<'a>) -> WishlistToggle {
        let product_id = item.product_id;

        if self.remove(product_id).is_some() {
            return WishlistToggle::Removed;
        }

        tracing::debug!(%product_id, "wishlist item added");

        self.items.push(item);

        WishlistToggle::Added
    }

    /// Check whether a product is saved.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Find a saved product.
    pub fn get(&self, product_id: ProductId) -> Option<&WishlistItem<'a>> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Drop a product. Removing an unsaved product does nothing.
    pub fn remove(&mut self, product_id: ProductId) -> Option<WishlistItem<'a>> {
        let position = self
            .items
            .iter()
            .position(|item| item.product_id == product_id)?;

        tracing::debug!(%product_id, "wishlist item removed");

        Some(self.items.remove(position))
    }

    /// Iterate over saved products in the order they were saved.
    pub fn iter(&self) -> impl Iterator<Item = &WishlistItem<'a>> {
        self.items.iter()
    }

    /// Number of saved products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
