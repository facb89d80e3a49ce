//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::{cart::NewCartItem, wishlist::WishlistItem};

/// Image shown when a product has no usable image reference.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Maximum number of images shown in a quick view.
pub const QUICK_VIEW_IMAGES: usize = 4;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Public product identifier, as used in product URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A named colour swatch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Color {
    /// Display name, unique within a product
    pub name: String,

    /// CSS hex value, e.g. `#1a1a1a`
    pub hex: String,
}

impl Color {
    /// Create a new colour swatch.
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Category label, e.g. `WOMEN`
    pub category: String,

    /// Long-form description
    pub description: String,

    /// Material composition
    pub material: String,

    /// Product price
    pub price: Money<'a, Currency>,

    /// Pre-discount price, display only
    pub original_price: Option<Money<'a, Currency>>,

    /// Image URIs in display order
    pub images: Vec<String>,

    /// Available colours
    pub colors: SmallVec<[Color; 4]>,

    /// Available sizes in display order
    pub sizes: SmallVec<[String; 6]>,

    /// Shown with a "NEW" badge
    pub is_new: bool,

    /// Shown with a "BESTSELLER" badge
    pub is_bestseller: bool,

    /// Bullet-point product details
    pub details: Vec<String>,
}

impl<'a> Product<'a> {
    /// The first image, or the placeholder if the product has none.
    pub fn primary_image(&self) -> &str {
        self.images.first().map_or(PLACEHOLDER_IMAGE, String::as_str)
    }

    /// Images shown in the quick view.
    pub fn quick_view_images(&self) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .take(QUICK_VIEW_IMAGES)
            .map(String::as_str)
    }

    /// Find a colour by name.
    pub fn color(&self, name: &str) -> Option<&Color> {
        self.colors.iter().find(|color| color.name == name)
    }

    /// Check whether the product is offered in the given colour.
    pub fn has_color(&self, name: &str) -> bool {
        self.color(name).is_some()
    }

    /// Check whether the product is offered in the given size.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Snapshot used by the wishlist.
    pub fn summary(&self) -> WishlistItem<'a> {
        WishlistItem {
            product_id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.primary_image().to_string(),
            category: self.category.clone(),
        }
    }

    /// Snapshot used by the cart for the given size and colour.
    pub fn cart_item(&self, size: impl Into<String>, color: impl Into<String>) -> NewCartItem<'a> {
        NewCartItem {
            product_id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.primary_image().to_string(),
            size: size.into(),
            color: color.into(),
        }
    }
}
