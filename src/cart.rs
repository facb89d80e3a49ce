//! Cart
//!
//! Session cart keyed by product, size and colour. Each line carries a
//! snapshot of the product's name, price and image taken when it was first
//! added. Quantities are always positive: setting a line to zero removes it.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    notifications::Notification,
    pricing::{TotalPriceError, total_price},
    products::ProductId,
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item currency, cart currency).
    #[error("Item has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartKey {
    /// Product identifier
    pub product_id: ProductId,

    /// Selected size
    pub size: String,

    /// Selected colour name
    pub color: String,
}

impl CartKey {
    /// Create a new cart key.
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }

    fn matches(&self, product_id: ProductId, size: &str, color: &str) -> bool {
        self.product_id == product_id && self.size == size && self.color == color
    }
}

/// An item about to be added to the cart. Quantity is decided by the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem<'a> {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name at the time of adding
    pub name: String,

    /// Unit price at the time of adding
    pub price: Money<'a, Currency>,

    /// Image shown in the cart drawer
    pub image: String,

    /// Selected size
    pub size: String,

    /// Selected colour name
    pub color: String,
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem<'a> {
    key: CartKey,
    name: String,
    price: Money<'a, Currency>,
    image: String,
    quantity: NonZeroU32,
}

impl<'a> CartItem<'a> {
    /// Line identity.
    pub fn key(&self) -> &CartKey {
        &self.key
    }

    /// Product identifier.
    pub fn product_id(&self) -> ProductId {
        self.key.product_id
    }

    /// Selected size.
    pub fn size(&self) -> &str {
        &self.key.size
    }

    /// Selected colour name.
    pub fn color(&self) -> &str {
        &self.key.color
    }

    /// Product name snapshot.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price snapshot.
    pub fn price(&self) -> Money<'a, Currency> {
        self.price
    }

    /// Image snapshot.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Number of units on this line.
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }
}

/// Whether an add created a new line or bumped an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was inserted with quantity 1.
    Added,

    /// An existing line's quantity was increased by 1.
    Updated,
}

/// Result of adding an item to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdate {
    /// What happened to the cart
    pub outcome: AddOutcome,

    /// Line quantity after the add
    pub quantity: NonZeroU32,

    /// Confirmation to show the shopper
    pub notification: Notification,
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<CartItem<'a>>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart priced in the given currency.
    pub fn new(currency: &'a Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of an item.
    ///
    /// If a line with the same product, size and colour exists its quantity
    /// goes up by exactly one, otherwise a new line is inserted with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the item is priced in another currency.
    pub fn add(&mut self, item: NewCartItem<'a>) -> Result<CartUpdate, CartError> {
        let item_currency = item.price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.key.matches(item.product_id, &item.size, &item.color))
        {
            existing.quantity = existing.quantity.saturating_add(1);

            tracing::debug!(
                product_id = %item.product_id,
                size = %item.size,
                color = %item.color,
                quantity = existing.quantity.get(),
                "cart line incremented"
            );

            return Ok(CartUpdate {
                outcome: AddOutcome::Updated,
                quantity: existing.quantity,
                notification: Notification::new(
                    "Updated cart",
                    format!("{} quantity increased", item.name),
                ),
            });
        }

        let notification = Notification::new(
            "Added to cart",
            format!("{} - Size {}, {}", item.name, item.size, item.color),
        );

        tracing::debug!(
            product_id = %item.product_id,
            size = %item.size,
            color = %item.color,
            "cart line added"
        );

        self.items.push(CartItem {
            key: CartKey {
                product_id: item.product_id,
                size: item.size,
                color: item.color,
            },
            name: item.name,
            price: item.price,
            image: item.image,
            quantity: NonZeroU32::MIN,
        });

        Ok(CartUpdate {
            outcome: AddOutcome::Added,
            quantity: NonZeroU32::MIN,
            notification,
        })
    }

    /// Remove a line. Returns the removed line, or `None` if there was no such line.
    pub fn remove(&mut self, product_id: ProductId, size: &str, color: &str) -> Option<CartItem<'a>> {
        let position = self
            .items
            .iter()
            .position(|line| line.key.matches(product_id, size, color))?;

        tracing::debug!(%product_id, size, color, "cart line removed");

        Some(self.items.remove(position))
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or less removes the line. Unknown lines are left
    /// alone. Returns the line's quantity afterwards, if it still exists.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> Option<NonZeroU32> {
        let Some(quantity) = u32::try_from(quantity.max(0))
            .map_or(NonZeroU32::new(u32::MAX), NonZeroU32::new)
        else {
            self.remove(product_id, size, color);
            return None;
        };

        let line = self
            .items
            .iter_mut()
            .find(|line| line.key.matches(product_id, size, color))?;

        line.quantity = quantity;

        tracing::debug!(
            %product_id,
            size,
            color,
            quantity = quantity.get(),
            "cart line quantity set"
        );

        Some(quantity)
    }

    /// Find a line by its key.
    pub fn get(&self, key: &CartKey) -> Option<&CartItem<'a>> {
        self.items.iter().find(|line| &line.key == key)
    }

    /// Iterate over the lines in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem<'a>> {
        self.items.iter()
    }

    /// Sum of quantities over all lines.
    pub fn total_items(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Sum of `price × quantity` over all lines.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line total overflows.
    pub fn total_price(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(
            self.items
                .iter()
                .map(|line| (line.price, line.quantity.get())),
            self.currency,
        )
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
