//! ELEVÉ storefront CLI

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use eleve::{
    cart::CartError,
    catalog::Catalog,
    filters::{PriceRange, ProductFilter, SortOrder},
    fixtures::{Fixture, FixtureError},
    listing::{self, RenderError},
    logging::{self, LogFormat},
    newsletter,
    notifications::Notification,
    products::ProductId,
    reviews::HelpfulVotes,
    selection::ProductSelection,
    storefront::{MoveToCart, Storefront, StorefrontError},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "eleve", about = "ELEVÉ storefront", long_about = None)]
struct Cli {
    /// Directory holding `catalog/` and `reviews/` fixture files
    #[arg(long, env = "ELEVE_FIXTURES", default_value = "./fixtures")]
    fixtures: PathBuf,

    /// Fixture set name
    #[arg(long, env = "ELEVE_FIXTURE_SET", default_value = "eleve")]
    set: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ELEVE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "ELEVE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, filtered and sorted
    Products(ProductsArgs),

    /// Show the available filter options
    Facets,

    /// Show one product with its reviews
    Product(ProductArgs),

    /// Run a scripted shopping session
    Demo,
}

#[derive(Debug, Args)]
struct ProductsArgs {
    /// Only show this category (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Only show products offered in this colour (repeatable)
    #[arg(long = "color")]
    colors: Vec<String>,

    /// Lowest price, in major units
    #[arg(long)]
    min: Option<Decimal>,

    /// Highest price, in major units
    #[arg(long)]
    max: Option<Decimal>,

    /// Sort order
    #[arg(long, value_enum, default_value_t)]
    sort: SortOrder,
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Product id
    id: u32,

    /// List every review instead of the first few
    #[arg(long)]
    all_reviews: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    #[error("Demo needs at least 4 products, catalog has {0}")]
    CatalogTooSmall(usize),

    #[error("Failed to write output")]
    IO,
}

#[expect(clippy::print_stderr, reason = "top-level error reporting for the CLI")]
fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = logging::init_subscriber(&cli.log_level, cli.log_format) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut fixture = Fixture::with_base_path(&cli.fixtures);

    fixture.load_catalog(&cli.set)?.load_reviews(&cli.set)?;

    let catalog = fixture.catalog()?;
    let out = io::stdout().lock();

    match &cli.command {
        Commands::Products(args) => list_products(out, &catalog, args),
        Commands::Facets => Ok(listing::write_facets(out, &catalog)?),
        Commands::Product(args) => {
            let id = ProductId(args.id);
            let product = catalog.get(id).ok_or(CliError::ProductNotFound(id))?;

            Ok(listing::write_product(
                out,
                product,
                fixture.reviews().for_product(id),
                &HelpfulVotes::new(),
                args.all_reviews,
            )?)
        }
        Commands::Demo => demo(out, &catalog),
    }
}

fn list_products(
    out: impl Write,
    catalog: &Catalog<'_>,
    args: &ProductsArgs,
) -> Result<(), CliError> {
    let filter = build_filter(catalog, args)?;

    tracing::debug!(active = filter.active_count(), sort = %args.sort, "listing products");

    let products = catalog.query(&filter, args.sort);

    Ok(listing::write_products(out, &products)?)
}

/// Selections from repeated flags accumulate; a missing price end falls back
/// to the catalog bound.
fn build_filter<'a>(
    catalog: &Catalog<'a>,
    args: &ProductsArgs,
) -> Result<ProductFilter<'a>, CliError> {
    let mut filter = catalog.filter();

    for category in &args.categories {
        filter = filter.with_category(category.clone());
    }

    for color in &args.colors {
        filter = filter.with_color(color.clone());
    }

    if args.min.is_some() || args.max.is_some() {
        let bounds = catalog.price_bounds();
        let currency = catalog.currency();

        let low = args
            .min
            .map(|amount| to_money(amount, currency))
            .transpose()?
            .unwrap_or(bounds.low());

        let high = args
            .max
            .map(|amount| to_money(amount, currency))
            .transpose()?
            .unwrap_or(bounds.high());

        filter.set_price_range(PriceRange::new(low, high));
    }

    Ok(filter)
}

fn to_money(amount: Decimal, currency: &Currency) -> Result<Money<'_, Currency>, CliError> {
    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or(CliError::InvalidPrice(amount))?;

    let minor_units = amount
        .checked_mul(Decimal::from(scale))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(CliError::InvalidPrice(amount))?;

    Ok(Money::from_minor(minor_units, currency))
}

fn demo(mut out: impl Write, catalog: &Catalog<'_>) -> Result<(), CliError> {
    let mut session = Storefront::new(catalog);
    let mut toasts: Vec<Notification> = Vec::new();
    let products = catalog.iter().take(4).collect::<Vec<_>>();

    let [first, second, third, fourth] = products.as_slice() else {
        return Err(CliError::CatalogTooSmall(catalog.len()));
    };

    let mut selection = ProductSelection::new();

    if let Some(size) = first.sizes.first() {
        selection.select_size(size.clone());
    }

    if let Some(color) = first.colors.first() {
        selection.select_color(color.name.clone());
    }

    for _ in 0..2 {
        toasts.push(session.add_selection_to_cart(first.id, &selection)?.notification);
    }

    let size = second.sizes.first().map_or("M", String::as_str);
    let color = second.colors.first().map_or("Default", |color| color.name.as_str());

    toasts.push(session.add_to_cart(second.cart_item(size, color))?.notification);
    session.update_quantity(second.id, size, color, 3);

    session.toggle_wishlist_product(third.id);
    session.toggle_wishlist_product(fourth.id);

    if let Some(update) = session.move_to_cart(third.id, &MoveToCart::default())? {
        toasts.push(update.notification);
    }

    if let Ok(notification) = newsletter::subscribe("hello@eleve.example") {
        toasts.push(notification);
    }

    for toast in &toasts {
        writeln!(out, "{toast}").map_err(|_err| CliError::IO)?;
    }

    writeln!(out).map_err(|_err| CliError::IO)?;
    listing::write_cart(&mut out, session.cart())?;
    writeln!(out).map_err(|_err| CliError::IO)?;
    listing::write_wishlist(&mut out, session.wishlist())?;

    Ok(())
}
