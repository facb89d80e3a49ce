//! Reviews

use rust_decimal::{Decimal, RoundingStrategy};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::products::ProductId;

/// Number of reviews shown before "show all".
pub const INITIAL_REVIEWS: usize = 2;

/// A customer review.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Identifier, unique within one product's reviews
    pub id: u32,

    /// Display name of the reviewer
    pub author: String,

    /// Star rating from 0 to 5
    pub rating: Decimal,

    /// Date as displayed
    pub date: String,

    /// Headline
    pub title: String,

    /// Body text
    pub content: String,

    /// Number of shoppers who found the review helpful
    pub helpful: u32,

    /// Reviewer bought the product
    pub verified: bool,
}

/// Reviews by product, with a default set for products that have none.
#[derive(Debug, Clone, Default)]
pub struct ReviewBook {
    by_product: FxHashMap<ProductId, Vec<Review>>,
    default: Vec<Review>,
}

impl ReviewBook {
    /// Create a review book with the given fallback reviews.
    pub fn new(default: Vec<Review>) -> Self {
        Self {
            by_product: FxHashMap::default(),
            default,
        }
    }

    /// Set the reviews for a product.
    pub fn insert(&mut self, product_id: ProductId, reviews: Vec<Review>) {
        self.by_product.insert(product_id, reviews);
    }

    /// Reviews for a product, falling back to the default set.
    pub fn for_product(&self, product_id: ProductId) -> &[Review] {
        self.by_product
            .get(&product_id)
            .map_or(self.default.as_slice(), Vec::as_slice)
    }
}

/// Reviews to display: the first few, or all of them.
pub fn displayed(reviews: &[Review], show_all: bool) -> &[Review] {
    if show_all {
        return reviews;
    }

    reviews.get(..INITIAL_REVIEWS).unwrap_or(reviews)
}

/// One bar of the rating histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBucket {
    /// Star value, 5 down to 1
    pub stars: u8,

    /// Reviews whose rating rounds down to `stars`
    pub count: usize,

    /// `count` as a percentage of all reviews
    pub percentage: Decimal,
}

/// Aggregate view of a product's reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    /// Mean rating to one decimal place
    pub average: Decimal,

    /// Number of reviews
    pub total: usize,

    /// Histogram from 5 stars down to 1
    pub distribution: [RatingBucket; 5],
}

impl ReviewSummary {
    /// Summarise a set of reviews. An empty set averages zero.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let total = reviews.len();
        let total_dec = Decimal::from(total);

        let average = if total == 0 {
            Decimal::ZERO
        } else {
            let sum: Decimal = reviews.iter().map(|review| review.rating).sum();

            (sum / total_dec).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        };

        let distribution = [5u8, 4, 3, 2, 1].map(|stars| {
            let count = reviews
                .iter()
                .filter(|review| review.rating.floor() == Decimal::from(stars))
                .count();

            let percentage = if total == 0 {
                Decimal::ZERO
            } else {
                Decimal::from(count) * Decimal::ONE_HUNDRED / total_dec
            };

            RatingBucket {
                stars,
                count,
                percentage,
            }
        });

        Self {
            average,
            total,
            distribution,
        }
    }

    /// "review" or "reviews" to match the total.
    pub fn noun(&self) -> &'static str {
        if self.total == 1 { "review" } else { "reviews" }
    }
}

/// Reviews the shopper has marked helpful during this visit.
#[derive(Debug, Clone, Default)]
pub struct HelpfulVotes {
    marked: FxHashSet<u32>,
}

impl HelpfulVotes {
    /// Start with no votes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a review helpful. Returns `false` if it was already marked.
    pub fn mark(&mut self, review_id: u32) -> bool {
        self.marked.insert(review_id)
    }

    /// Check whether a review is marked.
    pub fn is_marked(&self, review_id: u32) -> bool {
        self.marked.contains(&review_id)
    }

    /// Helpful count including this shopper's vote.
    pub fn helpful_count(&self, review: &Review) -> u32 {
        if self.is_marked(review.id) {
            review.helpful.saturating_add(1)
        } else {
            review.helpful
        }
    }
}
