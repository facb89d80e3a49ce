//! Listing
//!
//! Plain-text rendering of catalog pages and the bag for the terminal.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::Catalog,
    filters::SortOrder,
    pricing::TotalPriceError,
    products::Product,
    reviews::{HelpfulVotes, Review, ReviewSummary, displayed},
    wishlist::Wishlist,
};

/// Errors that can occur when rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error calculating the bag total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write a product grid with a result count.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if the output cannot be written.
pub fn write_products(mut out: impl io::Write, products: &[&Product<'_>]) -> Result<(), RenderError> {
    if products.is_empty() {
        return writeln!(out, "No products match your filters.").map_err(|_err| RenderError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["#", "Product", "Category", "Price", "Badges"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            price_label(product),
            badges(product),
        ]);
    }

    write_table(&mut out, builder, &[3])?;

    let noun = if products.len() == 1 { "product" } else { "products" };

    writeln!(out, "{} {noun}", products.len()).map_err(|_err| RenderError::IO)
}

/// Write the filter options a catalog offers.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if the output cannot be written.
pub fn write_facets(mut out: impl io::Write, catalog: &Catalog<'_>) -> Result<(), RenderError> {
    let bounds = catalog.price_bounds();

    let colors = catalog
        .colors()
        .iter()
        .map(|color| format!("{} ({})", color.name, color.hex))
        .collect::<Vec<_>>();

    let sorts = SortOrder::ALL
        .iter()
        .map(|sort| format!("{} ({})", sort.label(), sort.as_str()))
        .collect::<Vec<_>>();

    let mut builder = Builder::default();

    builder.push_record(["Facet", "Options"]);
    builder.push_record(["Category".to_string(), catalog.categories().join(", ")]);
    builder.push_record(["Color".to_string(), colors.join(", ")]);
    builder.push_record([
        "Price".to_string(),
        format!("{} - {}", bounds.low(), bounds.high()),
    ]);
    builder.push_record(["Sort".to_string(), sorts.join(", ")]);

    write_table(&mut out, builder, &[])
}

/// Write a product page with its review summary.
///
/// Only the first reviews are listed unless `show_all` is set. Helpful
/// counts include the shopper's own `votes`.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if the output cannot be written.
pub fn write_product(
    mut out: impl io::Write,
    product: &Product<'_>,
    reviews: &[Review],
    votes: &HelpfulVotes,
    show_all: bool,
) -> Result<(), RenderError> {
    let io_err = |_err: io::Error| RenderError::IO;

    writeln!(out, "{}", product.category).map_err(io_err)?;
    writeln!(out, "{}", product.name).map_err(io_err)?;
    writeln!(out, "{}", price_label(product)).map_err(io_err)?;

    let badges = badges(product);

    if !badges.is_empty() {
        writeln!(out, "{badges}").map_err(io_err)?;
    }

    writeln!(out, "\n{}\n", product.description).map_err(io_err)?;

    let colors = product
        .colors
        .iter()
        .map(|color| color.name.as_str())
        .collect::<Vec<_>>();

    writeln!(out, "Colors: {}", colors.join(", ")).map_err(io_err)?;
    writeln!(out, "Sizes: {}", product.sizes.join(", ")).map_err(io_err)?;
    writeln!(out, "Material: {}", product.material).map_err(io_err)?;

    for detail in &product.details {
        writeln!(out, "  - {detail}").map_err(io_err)?;
    }

    write_reviews(&mut out, reviews, votes, show_all)
}

fn write_reviews(
    out: &mut impl io::Write,
    reviews: &[Review],
    votes: &HelpfulVotes,
    show_all: bool,
) -> Result<(), RenderError> {
    let io_err = |_err: io::Error| RenderError::IO;
    let summary = ReviewSummary::from_reviews(reviews);

    writeln!(
        out,
        "\nCustomer Reviews: {:.1} out of 5 ({} {})",
        summary.average,
        summary.total,
        summary.noun()
    )
    .map_err(io_err)?;

    let mut builder = Builder::default();

    builder.push_record(["Stars", "Count", "Share"]);

    for bucket in &summary.distribution {
        builder.push_record([
            bucket.stars.to_string(),
            bucket.count.to_string(),
            format!("{}%", bucket.percentage.round_dp(0)),
        ]);
    }

    write_table(out, builder, &[1, 2])?;

    let shown = displayed(reviews, show_all);

    for review in shown {
        let verified = if review.verified { " (Verified Purchase)" } else { "" };

        writeln!(out, "\n{} - {}{verified}", review.author, review.date).map_err(io_err)?;
        writeln!(out, "{}/5 {}", review.rating, review.title).map_err(io_err)?;
        writeln!(out, "{}", review.content).map_err(io_err)?;
        writeln!(out, "Helpful ({})", votes.helpful_count(review)).map_err(io_err)?;
    }

    if shown.len() < reviews.len() {
        writeln!(out, "\nShow All {} Reviews", reviews.len()).map_err(io_err)?;
    }

    Ok(())
}

/// Write the bag contents and subtotal.
///
/// # Errors
///
/// Returns a [`RenderError`] if the subtotal cannot be calculated or the
/// output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), RenderError> {
    writeln!(out, "Shopping Bag ({})", cart.total_items()).map_err(|_err| RenderError::IO)?;

    if cart.is_empty() {
        return writeln!(out, "Your bag is empty").map_err(|_err| RenderError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "Size", "Color", "Qty", "Price"]);

    for item in cart.iter() {
        builder.push_record([
            item.name().to_string(),
            item.size().to_string(),
            item.color().to_string(),
            item.quantity().to_string(),
            item.price().to_string(),
        ]);
    }

    write_table(&mut out, builder, &[3, 4])?;

    writeln!(out, "Subtotal: {}", cart.total_price()?).map_err(|_err| RenderError::IO)
}

/// Write the saved products.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if the output cannot be written.
pub fn write_wishlist(mut out: impl io::Write, wishlist: &Wishlist<'_>) -> Result<(), RenderError> {
    writeln!(out, "Wishlist ({})", wishlist.len()).map_err(|_err| RenderError::IO)?;

    if wishlist.is_empty() {
        return writeln!(out, "Your wishlist is empty").map_err(|_err| RenderError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Product", "Category", "Price"]);

    for item in wishlist.iter() {
        builder.push_record([item.name.clone(), item.category.clone(), item.price.to_string()]);
    }

    write_table(&mut out, builder, &[2])
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: &[usize],
) -> Result<(), RenderError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    for &column in right_aligned {
        table.modify(Columns::new(column..=column), Alignment::right());
    }

    table.modify(Rows::first(), Alignment::left());

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)
}

fn price_label(product: &Product<'_>) -> String {
    match &product.original_price {
        Some(original) => format!("{} (was {original})", product.price),
        None => product.price.to_string(),
    }
}

fn badges(product: &Product<'_>) -> String {
    let mut badges = Vec::new();

    if product.is_new {
        badges.push("NEW");
    }

    if product.is_bestseller {
        badges.push("BESTSELLER");
    }

    badges.join(" ")
}
