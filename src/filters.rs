//! Filters
//!
//! Narrowing and ordering of the product listing. A product is listed when
//! every active criterion holds: its category is selected (or none are), it
//! comes in a selected colour (or none are), and its price lies inside the
//! inclusive price range. Sorting is stable, so products that compare equal
//! keep their featured order.

use std::{cmp::Reverse, fmt, str::FromStr};

use clap::ValueEnum;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::Product;

/// Listing sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order
    #[default]
    Featured,

    /// New arrivals first
    Newest,

    /// Bestsellers first
    Bestsellers,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,
}

impl SortOrder {
    /// All sort orders in menu order.
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Featured,
        SortOrder::Newest,
        SortOrder::Bestsellers,
        SortOrder::PriceLow,
        SortOrder::PriceHigh,
    ];

    /// Identifier used in URLs and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::Newest => "newest",
            SortOrder::Bestsellers => "bestsellers",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Featured => "Featured",
            SortOrder::Newest => "Newest",
            SortOrder::Bestsellers => "Bestsellers",
            SortOrder::PriceLow => "Price: Low to High",
            SortOrder::PriceHigh => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort order identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown sort order: {0}")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| ParseSortOrderError(s.to_string()))
    }
}

/// Inclusive price interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange<'a> {
    low: Money<'a, Currency>,
    high: Money<'a, Currency>,
}

impl<'a> PriceRange<'a> {
    /// Create a range. The ends are swapped if given the wrong way round.
    pub fn new(low: Money<'a, Currency>, high: Money<'a, Currency>) -> Self {
        if low.to_minor_units() > high.to_minor_units() {
            Self {
                low: high,
                high: low,
            }
        } else {
            Self { low, high }
        }
    }

    /// Lower bound.
    pub fn low(&self) -> Money<'a, Currency> {
        self.low
    }

    /// Upper bound.
    pub fn high(&self) -> Money<'a, Currency> {
        self.high
    }

    /// Check whether a price lies inside the range. Prices in another currency never do.
    pub fn contains(&self, price: &Money<'_, Currency>) -> bool {
        if price.currency() != self.low.currency() {
            return false;
        }

        let minor = price.to_minor_units();

        self.low.to_minor_units() <= minor && minor <= self.high.to_minor_units()
    }

    /// Restrict this range to lie within `bounds`.
    ///
    /// Returns `None` if either end is priced in a currency other than the bounds'.
    #[must_use]
    pub fn clamp_to(self, bounds: &PriceRange<'a>) -> Option<Self> {
        let currency = bounds.low.currency();

        if self.low.currency() != currency || self.high.currency() != currency {
            return None;
        }

        let clamp = |value: Money<'a, Currency>| {
            let minor = value
                .to_minor_units()
                .clamp(bounds.low.to_minor_units(), bounds.high.to_minor_units());

            Money::from_minor(minor, currency)
        };

        Some(Self::new(clamp(self.low), clamp(self.high)))
    }
}

/// Listing filter state: selected categories, selected colours and a price range.
///
/// Remembers the catalog's global price bounds so that clearing restores
/// exactly those bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter<'a> {
    categories: SmallVec<[String; 4]>,
    colors: SmallVec<[String; 4]>,
    price: PriceRange<'a>,
    bounds: PriceRange<'a>,
}

impl<'a> ProductFilter<'a> {
    /// A filter that matches everything within `bounds`.
    pub fn new(bounds: PriceRange<'a>) -> Self {
        Self {
            categories: SmallVec::new(),
            colors: SmallVec::new(),
            price: bounds,
            bounds,
        }
    }

    /// Select a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();

        if !self.categories.contains(&category) {
            self.categories.push(category);
        }

        self
    }

    /// Select a colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();

        if !self.colors.contains(&color) {
            self.colors.push(color);
        }

        self
    }

    /// Set the price range.
    #[must_use]
    pub fn with_price_range(mut self, range: PriceRange<'a>) -> Self {
        self.set_price_range(range);
        self
    }

    /// Select the category if unselected, otherwise unselect it.
    pub fn toggle_category(&mut self, category: &str) {
        toggle(&mut self.categories, category);
    }

    /// Select the colour if unselected, otherwise unselect it.
    pub fn toggle_color(&mut self, color: &str) {
        toggle(&mut self.colors, color);
    }

    /// Set the price range, clamped to the global bounds.
    ///
    /// A range in another currency is ignored and the current range kept.
    pub fn set_price_range(&mut self, range: PriceRange<'a>) {
        match range.clamp_to(&self.bounds) {
            Some(range) => self.price = range,
            None => tracing::debug!(
                currency = range.low.currency().iso_alpha_code,
                "price range in another currency ignored"
            ),
        }
    }

    /// Unselect everything and reset the price range to the global bounds.
    pub fn clear(&mut self) {
        self.categories.clear();
        self.colors.clear();
        self.price = self.bounds;
    }

    /// Selected categories, in selection order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Selected colour names, in selection order.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Current price range.
    pub fn price_range(&self) -> PriceRange<'a> {
        self.price
    }

    /// Global price bounds this filter resets to.
    pub fn bounds(&self) -> PriceRange<'a> {
        self.bounds
    }

    /// Check whether anything narrows the listing.
    pub fn is_active(&self) -> bool {
        !self.categories.is_empty()
            || !self.colors.is_empty()
            || self.price.low.to_minor_units() > self.bounds.low.to_minor_units()
            || self.price.high.to_minor_units() < self.bounds.high.to_minor_units()
    }

    /// Number of selected categories and colours.
    pub fn active_count(&self) -> usize {
        self.categories.len() + self.colors.len()
    }

    /// Check whether a product passes every criterion.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        let category_match =
            self.categories.is_empty() || self.categories.contains(&product.category);

        let color_match = self.colors.is_empty()
            || product
                .colors
                .iter()
                .any(|color| self.colors.contains(&color.name));

        category_match && color_match && self.price.contains(&product.price)
    }
}

fn toggle(selection: &mut SmallVec<[String; 4]>, value: &str) {
    if let Some(position) = selection.iter().position(|selected| selected == value) {
        selection.remove(position);
    } else {
        selection.push(value.to_string());
    }
}

/// Filter and order products.
///
/// `products` must be in featured order; the result is a new list and the
/// input is left untouched.
pub fn filter_products<'p, 'a: 'p>(
    products: impl IntoIterator<Item = &'p Product<'a>>,
    filter: &ProductFilter<'_>,
    sort: SortOrder,
) -> Vec<&'p Product<'a>> {
    let mut result: Vec<&'p Product<'a>> = products
        .into_iter()
        .filter(|product| filter.matches(product))
        .collect();

    sort_products(&mut result, sort);

    result
}

/// Order products in place.
pub fn sort_products(products: &mut [&Product<'_>], sort: SortOrder) {
    match sort {
        SortOrder::Featured => {}
        SortOrder::Newest => products.sort_by_key(|product| !product.is_new),
        SortOrder::Bestsellers => products.sort_by_key(|product| !product.is_bestseller),
        SortOrder::PriceLow => products.sort_by_key(|product| product.price.to_minor_units()),
        SortOrder::PriceHigh => {
            products.sort_by_key(|product| Reverse(product.price.to_minor_units()));
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;
    use crate::products::{Color, tests::product};

    fn usd(major: i64) -> Money<'static, Currency> {
        Money::from_minor(major * 100, USD)
    }

    fn ids(products: &[&Product<'_>]) -> Vec<u32> {
        products.iter().map(|p| p.id.0).collect()
    }

    fn products() -> Vec<Product<'static>> {
        let mut a = product(1, 100, "MEN");
        a.is_bestseller = true;

        let mut b = product(2, 50, "WOMEN");
        b.is_new = true;
        b.colors = smallvec::smallvec![Color::new("Ivory", "#fffff0")];

        let mut c = product(3, 200, "WOMEN");
        c.is_new = true;
        c.is_bestseller = true;

        let mut d = product(4, 75, "KIDS");
        d.colors.push(Color::new("Ivory", "#fffff0"));

        let e = product(5, 150, "MEN");

        vec![a, b, c, d, e]
    }

    fn filter() -> ProductFilter<'static> {
        ProductFilter::new(PriceRange::new(usd(50), usd(200)))
    }

    #[test]
    fn empty_filter_keeps_catalog_order() {
        let products = products();

        let result = filter_products(&products, &filter(), SortOrder::Featured);

        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn category_filter() {
        let products = products();
        let filter = filter().with_category("MEN");

        let result = filter_products(&products, &filter, SortOrder::Featured);

        assert_eq!(ids(&result), vec![1, 5]);
    }

    #[test]
    fn colour_filter_matches_any_offered_colour() {
        let products = products();
        let filter = filter().with_color("Ivory");

        let result = filter_products(&products, &filter, SortOrder::Featured);

        assert_eq!(ids(&result), vec![2, 4]);
    }

    #[test]
    fn price_range_is_inclusive() {
        let products = products();
        let filter = filter().with_price_range(PriceRange::new(usd(75), usd(150)));

        let result = filter_products(&products, &filter, SortOrder::Featured);

        assert_eq!(ids(&result), vec![1, 4, 5]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let products = products();
        let filter = filter()
            .with_category("WOMEN")
            .with_category("KIDS")
            .with_color("Black")
            .with_price_range(PriceRange::new(usd(60), usd(200)));

        let result = filter_products(&products, &filter, SortOrder::Featured);

        assert_eq!(ids(&result), vec![3, 4]);
    }

    #[test]
    fn no_matches_is_empty_not_an_error() {
        let products = products();
        let filter = filter().with_category("ACCESSORIES");

        assert!(filter_products(&products, &filter, SortOrder::PriceLow).is_empty());
    }

    #[test]
    fn result_is_exactly_the_matching_subset() {
        let products = products();
        let filter = filter()
            .with_category("WOMEN")
            .with_category("MEN")
            .with_price_range(PriceRange::new(usd(60), usd(180)));

        for sort in SortOrder::ALL {
            let result = filter_products(&products, &filter, sort);

            assert!(result.iter().all(|p| filter.matches(p)));

            for product in products.iter().filter(|p| filter.matches(p)) {
                let occurrences = result.iter().filter(|r| r.id == product.id).count();
                assert_eq!(occurrences, 1, "{} listed {occurrences} times", product.id);
            }
        }
    }

    #[test]
    fn newest_is_a_stable_partition() {
        let products = products();

        let result = filter_products(&products, &filter(), SortOrder::Newest);

        assert_eq!(ids(&result), vec![2, 3, 1, 4, 5]);
    }

    #[test]
    fn bestsellers_is_a_stable_partition() {
        let products = products();

        let result = filter_products(&products, &filter(), SortOrder::Bestsellers);

        assert_eq!(ids(&result), vec![1, 3, 2, 4, 5]);
    }

    #[test]
    fn price_sorts_are_mirror_images_without_ties() {
        let products = products();

        let low = filter_products(&products, &filter(), SortOrder::PriceLow);
        let mut reversed = ids(&low);
        reversed.reverse();

        let high = filter_products(&products, &filter(), SortOrder::PriceHigh);

        assert_eq!(ids(&low), vec![2, 4, 1, 5, 3]);
        assert_eq!(reversed, ids(&high));
    }

    #[test]
    fn price_sorts_keep_ties_in_catalog_order() {
        let products = vec![
            product(1, 100, "MEN"),
            product(2, 50, "MEN"),
            product(3, 100, "MEN"),
            product(4, 50, "MEN"),
        ];
        let filter = ProductFilter::new(PriceRange::new(usd(0), usd(500)));

        let low = filter_products(&products, &filter, SortOrder::PriceLow);
        let high = filter_products(&products, &filter, SortOrder::PriceHigh);

        assert_eq!(ids(&low), vec![2, 4, 1, 3]);
        assert_eq!(ids(&high), vec![1, 3, 2, 4]);
    }

    #[test]
    fn toggles_select_and_unselect() {
        let mut filter = filter();

        filter.toggle_category("MEN");
        filter.toggle_color("Ivory");
        filter.toggle_category("WOMEN");

        assert_eq!(filter.categories(), ["MEN", "WOMEN"]);
        assert_eq!(filter.active_count(), 3);

        filter.toggle_category("MEN");

        assert_eq!(filter.categories(), ["WOMEN"]);
        assert_eq!(filter.colors(), ["Ivory"]);
    }

    #[test]
    fn clear_restores_global_bounds() {
        let mut filter = filter().with_category("MEN").with_color("Black");
        filter.set_price_range(PriceRange::new(usd(80), usd(90)));

        assert!(filter.is_active());

        filter.clear();

        assert!(!filter.is_active());
        assert_eq!(filter.active_count(), 0);
        assert_eq!(filter.price_range(), filter.bounds());
        assert_eq!(filter.price_range().low(), usd(50));
        assert_eq!(filter.price_range().high(), usd(200));
    }

    #[test]
    fn narrowed_price_range_alone_is_active() {
        let filter = filter().with_price_range(PriceRange::new(usd(50), usd(199)));

        assert!(filter.is_active());
        assert_eq!(filter.active_count(), 0);
    }

    #[test]
    fn out_of_range_prices_are_clamped() {
        let filter = filter().with_price_range(PriceRange::new(usd(10), usd(1_000)));

        assert_eq!(filter.price_range(), filter.bounds());
    }

    #[test]
    fn inverted_range_is_reordered() {
        let range = PriceRange::new(usd(150), usd(75));

        assert_eq!(range.low(), usd(75));
        assert_eq!(range.high(), usd(150));
    }

    #[test]
    fn range_in_other_currency_is_not_clamped() {
        let gbp = PriceRange::new(Money::from_minor(8_000, GBP), Money::from_minor(9_000, GBP));

        assert_eq!(gbp.clamp_to(&filter().bounds()), None);
    }

    #[test]
    fn setting_range_in_other_currency_keeps_current_range() {
        let mut filter = filter().with_price_range(PriceRange::new(usd(60), usd(120)));

        filter.set_price_range(PriceRange::new(
            Money::from_minor(8_000, GBP),
            Money::from_minor(9_000, GBP),
        ));

        assert_eq!(filter.price_range(), PriceRange::new(usd(60), usd(120)));
        assert_eq!(filter.price_range().low().currency(), USD);
    }

    #[test]
    fn price_in_other_currency_is_outside_range() {
        let range = PriceRange::new(usd(0), usd(500));

        assert!(!range.contains(&Money::from_minor(100, GBP)));
    }

    #[test]
    fn sort_order_round_trips_through_strings() -> TestResult {
        for order in SortOrder::ALL {
            assert_eq!(order.as_str().parse::<SortOrder>()?, order);
        }

        assert_eq!(SortOrder::PriceLow.to_string(), "price-low");
        assert_eq!(SortOrder::PriceHigh.label(), "Price: High to Low");
        assert!("cheapest".parse::<SortOrder>().is_err());

        Ok(())
    }
}
