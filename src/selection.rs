//! Product Selection
//!
//! The size and colour a shopper picks on a product page before adding it
//! to the cart.

use thiserror::Error;

use crate::{
    cart::NewCartItem,
    products::{Product, ProductId},
};

/// Reasons a selection cannot be added to the cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// No size chosen.
    #[error("Select a size")]
    MissingSize,

    /// No colour chosen.
    #[error("Select a colour")]
    MissingColor,

    /// The chosen size is not offered for this product.
    #[error("Product {0} is not available in size {1}")]
    UnknownSize(ProductId, String),

    /// The chosen colour is not offered for this product.
    #[error("Product {0} is not available in colour {1}")]
    UnknownColor(ProductId, String),
}

/// A shopper's size and colour choice for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSelection {
    size: Option<String>,
    color: Option<String>,
}

impl ProductSelection {
    /// Start with nothing chosen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.select_size(size);
        self
    }

    /// Choose a colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.select_color(color);
        self
    }

    /// Choose a size, replacing any earlier choice.
    pub fn select_size(&mut self, size: impl Into<String>) {
        self.size = Some(size.into());
    }

    /// Choose a colour, replacing any earlier choice.
    pub fn select_color(&mut self, color: impl Into<String>) {
        self.color = Some(color.into());
    }

    /// Chosen size.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Chosen colour.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Both a size and a colour are chosen.
    pub fn is_complete(&self) -> bool {
        self.size.is_some() && self.color.is_some()
    }

    /// Label for the add-to-bag button.
    pub fn call_to_action(&self) -> &'static str {
        if self.is_complete() {
            "ADD TO BAG"
        } else {
            "SELECT SIZE & COLOR"
        }
    }

    /// Build the cart item for `product`.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if the size or colour is missing or not
    /// offered by the product.
    pub fn to_cart_item<'a>(&self, product: &Product<'a>) -> Result<NewCartItem<'a>, SelectionError> {
        let size = self.size.as_deref().ok_or(SelectionError::MissingSize)?;
        let color = self.color.as_deref().ok_or(SelectionError::MissingColor)?;

        if !product.has_size(size) {
            return Err(SelectionError::UnknownSize(product.id, size.to_string()));
        }

        if !product.has_color(color) {
            return Err(SelectionError::UnknownColor(product.id, color.to_string()));
        }

        Ok(product.cart_item(size, color))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::products::tests::product;

    #[test]
    fn requires_size_then_colour() {
        let product = product(1, 100, "MEN");

        assert_eq!(
            ProductSelection::new().to_cart_item(&product),
            Err(SelectionError::MissingSize)
        );
        assert_eq!(
            ProductSelection::new().with_size("M").to_cart_item(&product),
            Err(SelectionError::MissingColor)
        );
    }

    #[test]
    fn rejects_choices_the_product_does_not_offer() {
        let product = product(1, 100, "MEN");

        let wrong_size = ProductSelection::new().with_size("XXL").with_color("Black");
        let wrong_color = ProductSelection::new().with_size("M").with_color("Ivory");

        assert_eq!(
            wrong_size.to_cart_item(&product),
            Err(SelectionError::UnknownSize(ProductId(1), "XXL".to_string()))
        );
        assert_eq!(
            wrong_color.to_cart_item(&product),
            Err(SelectionError::UnknownColor(ProductId(1), "Ivory".to_string()))
        );
    }

    #[test]
    fn complete_selection_builds_cart_item() -> TestResult {
        let product = product(1, 100, "MEN");
        let selection = ProductSelection::new().with_color("Black").with_size("L");

        let item = selection.to_cart_item(&product)?;

        assert_eq!(item.size, "L");
        assert_eq!(item.color, "Black");
        assert_eq!(item.image, product.primary_image());

        Ok(())
    }

    #[test]
    fn later_choices_replace_earlier_ones() {
        let mut selection = ProductSelection::new();

        assert_eq!(selection.call_to_action(), "SELECT SIZE & COLOR");

        selection.select_size("S");
        selection.select_size("M");
        selection.select_color("Black");

        assert_eq!(selection.size(), Some("M"));
        assert_eq!(selection.color(), Some("Black"));
        assert!(selection.is_complete());
        assert_eq!(selection.call_to_action(), "ADD TO BAG");
    }
}
