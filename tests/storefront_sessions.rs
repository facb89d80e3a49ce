//! Integration tests for a shopping session over a small two-product catalog.
//!
//! Catalog:
//!
//! 1. MEN, $100.00, offered in Black and Navy, sizes S/M/L
//! 2. WOMEN, $50.00, offered in Black, sizes S/M/L

use rusty_money::{Money, iso::USD};
use smallvec::smallvec;
use testresult::TestResult;

use eleve::prelude::*;

fn product(id: u32, price: i64, category: &str, colors: &[&str]) -> Product<'static> {
    Product {
        id: ProductId(id),
        name: format!("Product {id}"),
        category: category.to_string(),
        description: String::new(),
        material: String::new(),
        price: Money::from_minor(price * 100, USD),
        original_price: None,
        images: vec![format!("/images/{id}.jpg")],
        colors: colors.iter().map(|name| Color::new(*name, "#000000")).collect(),
        sizes: smallvec!["S".to_string(), "M".to_string(), "L".to_string()],
        is_new: false,
        is_bestseller: false,
        details: Vec::new(),
    }
}

fn catalog() -> Result<Catalog<'static>, CatalogError> {
    Catalog::new(
        [
            product(1, 100, "MEN", &["Black", "Navy"]),
            product(2, 50, "WOMEN", &["Black"]),
        ],
        USD,
    )
}

fn ids(products: &[&Product<'_>]) -> Vec<u32> {
    products.iter().map(|product| product.id.0).collect()
}

#[test]
fn category_filter_then_price_reset_shows_both() -> TestResult {
    let catalog = catalog()?;
    let session = Storefront::new(&catalog);
    let mut filter = catalog.filter();

    filter.toggle_category("MEN");

    assert_eq!(ids(&session.products(&filter, SortOrder::Featured)), vec![1]);

    filter.clear();
    filter.set_price_range(PriceRange::new(
        Money::from_minor(5_000, USD),
        Money::from_minor(10_000, USD),
    ));

    assert_eq!(
        ids(&session.products(&filter, SortOrder::Featured)),
        vec![1, 2]
    );

    Ok(())
}

#[test]
fn colour_filter_matches_any_offered_colour() -> TestResult {
    let catalog = catalog()?;
    let filter = catalog.filter().with_color("Navy");

    assert_eq!(ids(&catalog.query(&filter, SortOrder::Featured)), vec![1]);

    let filter = filter.with_color("Black");

    assert_eq!(ids(&catalog.query(&filter, SortOrder::PriceLow)), vec![2, 1]);

    Ok(())
}

#[test]
fn adding_the_same_line_twice_bumps_quantity() -> TestResult {
    let catalog = catalog()?;
    let mut session = Storefront::new(&catalog);
    let shirt = session.product(ProductId(1)).ok_or("missing product 1")?;

    let first = session.add_to_cart(shirt.cart_item("M", "Black"))?;
    let second = session.add_to_cart(shirt.cart_item("M", "Black"))?;

    assert_eq!(first.outcome, AddOutcome::Added);
    assert_eq!(first.notification.title, "Added to cart");
    assert_eq!(second.outcome, AddOutcome::Updated);
    assert_eq!(second.notification.title, "Updated cart");
    assert_eq!(session.cart().len(), 1);
    assert_eq!(session.cart().total_items(), 2);
    assert_eq!(session.cart().total_price()?, Money::from_minor(20_000, USD));

    Ok(())
}

#[test]
fn toggling_twice_leaves_wishlist_empty() -> TestResult {
    let catalog = catalog()?;
    let mut session = Storefront::new(&catalog);
    let saved = session.product(ProductId(2)).ok_or("missing product 2")?.summary();

    assert_eq!(session.toggle_wishlist(saved.clone()), WishlistToggle::Added);
    assert_eq!(session.toggle_wishlist(saved), WishlistToggle::Removed);
    assert!(session.wishlist().is_empty());

    Ok(())
}

#[test]
fn zero_quantity_removes_the_line() -> TestResult {
    let catalog = catalog()?;
    let mut session = Storefront::new(&catalog);
    let shirt = session.product(ProductId(1)).ok_or("missing product 1")?;
    let dress = session.product(ProductId(2)).ok_or("missing product 2")?;

    session.add_to_cart(shirt.cart_item("M", "Black"))?;
    session.add_to_cart(dress.cart_item("S", "Black"))?;
    session.update_quantity(ProductId(2), "S", "Black", 4);

    assert_eq!(session.cart().total_items(), 5);

    assert_eq!(session.update_quantity(ProductId(1), "M", "Black", 0), None);
    assert_eq!(session.cart().len(), 1);
    assert_eq!(session.cart().total_items(), 4);

    Ok(())
}

#[test]
fn selection_flow_and_move_to_cart() -> TestResult {
    let catalog = catalog()?;
    let mut session = Storefront::new(&catalog);
    let mut selection = ProductSelection::new();

    assert_eq!(selection.call_to_action(), "SELECT SIZE & COLOR");

    selection.select_size("L");
    selection.select_color("Navy");

    assert_eq!(selection.call_to_action(), "ADD TO BAG");

    let update = session.add_selection_to_cart(ProductId(1), &selection)?;

    assert_eq!(update.notification.description, "Product 1 - Size L, Navy");

    session.toggle_wishlist_product(ProductId(2));

    let moved = session
        .move_to_cart(ProductId(2), &MoveToCart::default())?
        .ok_or("product 2 was not saved")?;

    assert_eq!(moved.outcome, AddOutcome::Added);
    assert!(!session.is_in_wishlist(ProductId(2)));
    assert!(
        session
            .cart()
            .get(&CartKey::new(ProductId(2), "M", "Default"))
            .is_some()
    );
    assert_eq!(session.cart().total_items(), 2);

    Ok(())
}
