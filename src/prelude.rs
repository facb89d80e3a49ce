//! ELEVÉ prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddOutcome, Cart, CartError, CartItem, CartKey, CartUpdate, NewCartItem},
    catalog::{Catalog, CatalogError},
    filters::{PriceRange, ProductFilter, SortOrder, filter_products, sort_products},
    fixtures::{Fixture, FixtureError},
    newsletter::{NewsletterError, subscribe},
    notifications::Notification,
    pricing::TotalPriceError,
    products::{Color, Product, ProductId, ProductKey},
    reviews::{HelpfulVotes, Review, ReviewBook, ReviewSummary},
    selection::{ProductSelection, SelectionError},
    storefront::{MoveToCart, Storefront, StorefrontError},
    wishlist::{Wishlist, WishlistItem, WishlistToggle},
};
