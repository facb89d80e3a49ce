//! Storefront
//!
//! A shopping session: the catalog it browses plus the cart and wishlist it
//! owns. State lives only as long as the session value.

use std::num::NonZeroU32;

use thiserror::Error;

use crate::{
    cart::{Cart, CartError, CartUpdate, NewCartItem},
    catalog::Catalog,
    filters::{ProductFilter, SortOrder},
    products::{Product, ProductId},
    selection::{ProductSelection, SelectionError},
    wishlist::{Wishlist, WishlistItem, WishlistToggle},
};

/// Errors from session actions that reference catalog products.
#[derive(Debug, Error, PartialEq)]
pub enum StorefrontError {
    /// The product id is not in the catalog.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// Incomplete or invalid size/colour choice.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Cart rejected the item.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Size and colour used when moving a wishlist item into the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveToCart {
    /// Size given to the new cart line
    pub size: String,

    /// Colour given to the new cart line
    pub color: String,
}

impl Default for MoveToCart {
    fn default() -> Self {
        Self {
            size: "M".to_string(),
            color: "Default".to_string(),
        }
    }
}

/// Storefront session
#[derive(Debug)]
pub struct Storefront<'a> {
    catalog: &'a Catalog<'a>,
    cart: Cart<'a>,
    wishlist: Wishlist<'a>,
}

impl<'a> Storefront<'a> {
    /// Start a session with an empty cart and wishlist.
    pub fn new(catalog: &'a Catalog<'a>) -> Self {
        Self {
            catalog,
            cart: Cart::new(catalog.currency()),
            wishlist: Wishlist::new(),
        }
    }

    /// The catalog being browsed.
    pub fn catalog(&self) -> &'a Catalog<'a> {
        self.catalog
    }

    /// The session cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// The session wishlist.
    pub fn wishlist(&self) -> &Wishlist<'a> {
        &self.wishlist
    }

    /// Look up a product. `None` means the product page should show "not found".
    pub fn product(&self, id: ProductId) -> Option<&'a Product<'a>> {
        self.catalog.get(id)
    }

    /// Products matching `filter`, in `sort` order.
    pub fn products(&self, filter: &ProductFilter<'_>, sort: SortOrder) -> Vec<&'a Product<'a>> {
        self.catalog.query(filter, sort)
    }

    /// Add one unit of an item to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the item is priced in another currency.
    pub fn add_to_cart(&mut self, item: NewCartItem<'a>) -> Result<CartUpdate, CartError> {
        self.cart.add(item)
    }

    /// Add a catalog product with the shopper's size and colour choice.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::ProductNotFound`]: unknown product id.
    /// - [`StorefrontError::Selection`]: size or colour missing or not offered.
    /// - [`StorefrontError::Cart`]: the cart rejected the item.
    pub fn add_selection_to_cart(
        &mut self,
        id: ProductId,
        selection: &ProductSelection,
    ) -> Result<CartUpdate, StorefrontError> {
        let product = self
            .catalog
            .get(id)
            .ok_or(StorefrontError::ProductNotFound(id))?;

        let item = selection.to_cart_item(product)?;

        Ok(self.cart.add(item)?)
    }

    /// Remove a cart line. Does nothing if there is no such line.
    pub fn remove_from_cart(&mut self, id: ProductId, size: &str, color: &str) {
        self.cart.remove(id, size, color);
    }

    /// Set a cart line's quantity; zero or less removes it.
    pub fn update_quantity(
        &mut self,
        id: ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> Option<NonZeroU32> {
        self.cart.update_quantity(id, size, color, quantity)
    }

    /// Save or unsave a product.
    pub fn toggle_wishlist(&mut self, item: WishlistItem<'a>) -> WishlistToggle {
        let toggle = self.wishlist.toggle(item);

        tracing::info!(?toggle, saved = self.wishlist.len(), "wishlist toggled");

        toggle
    }

    /// Save or unsave a catalog product. `None` if the id is unknown.
    pub fn toggle_wishlist_product(&mut self, id: ProductId) -> Option<WishlistToggle> {
        let summary = self.catalog.get(id)?.summary();

        Some(self.toggle_wishlist(summary))
    }

    /// Check whether a product is saved.
    pub fn is_in_wishlist(&self, id: ProductId) -> bool {
        self.wishlist.contains(id)
    }

    /// Unsave a product. Does nothing if it is not saved.
    pub fn remove_from_wishlist(&mut self, id: ProductId) {
        self.wishlist.remove(id);
    }

    /// Add a saved product to the cart with the given size and colour, then unsave it.
    ///
    /// Returns `Ok(None)` if the product is not saved. The product stays saved
    /// if the cart rejects it.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart rejects the item.
    pub fn move_to_cart(
        &mut self,
        id: ProductId,
        options: &MoveToCart,
    ) -> Result<Option<CartUpdate>, CartError> {
        let Some(saved) = self.wishlist.get(id) else {
            return Ok(None);
        };

        let item = NewCartItem {
            product_id: saved.product_id,
            name: saved.name.clone(),
            price: saved.price,
            image: saved.image.clone(),
            size: options.size.clone(),
            color: options.color.clone(),
        };

        let update = self.cart.add(item)?;

        self.wishlist.remove(id);

        tracing::info!(product_id = %id, "moved from wishlist to cart");

        Ok(Some(update))
    }
}
