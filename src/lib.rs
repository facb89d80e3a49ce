//! ELEVÉ
//!
//! ELEVÉ is the storefront core of a fashion shop: a product catalog with
//! category, colour and price filters, a shopping bag keyed by product, size
//! and colour, and a wishlist that can move saved items into the bag.

pub mod cart;
pub mod catalog;
pub mod filters;
pub mod fixtures;
pub mod listing;
pub mod logging;
pub mod newsletter;
pub mod notifications;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod reviews;
pub mod selection;
pub mod storefront;
pub mod wishlist;
