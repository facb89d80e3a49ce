//! Review Fixtures

use rust_decimal::{Decimal, prelude::FromPrimitive};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{fixtures::FixtureError, reviews::Review};

/// Wrapper for reviews in YAML
#[derive(Debug, Deserialize)]
pub struct ReviewsFixture {
    /// Reviews shown for products without their own
    #[serde(default)]
    pub default: Vec<ReviewFixture>,

    /// Reviews keyed by product id
    #[serde(default)]
    pub products: FxHashMap<u32, Vec<ReviewFixture>>,
}

/// Review Fixture
#[derive(Debug, Deserialize)]
pub struct ReviewFixture {
    /// Review identifier
    pub id: u32,

    /// Reviewer display name
    pub author: String,

    /// Star rating (e.g., 4.5)
    pub rating: f64,

    /// Date as displayed
    pub date: String,

    /// Headline
    pub title: String,

    /// Body text
    pub content: String,

    /// Helpful votes so far
    #[serde(default)]
    pub helpful: u32,

    /// Verified purchase
    #[serde(default)]
    pub verified: bool,
}

impl TryFrom<ReviewFixture> for Review {
    type Error = FixtureError;

    fn try_from(fixture: ReviewFixture) -> Result<Self, Self::Error> {
        let rating = Decimal::from_f64(fixture.rating)
            .filter(|rating| (Decimal::ZERO..=Decimal::from(5)).contains(rating))
            .ok_or(FixtureError::InvalidRating {
                review: fixture.id,
                rating: fixture.rating,
            })?;

        Ok(Review {
            id: fixture.id,
            author: fixture.author,
            rating,
            date: fixture.date,
            title: fixture.title,
            content: fixture.content,
            helpful: fixture.helpful,
            verified: fixture.verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(rating: f64) -> ReviewFixture {
        ReviewFixture {
            id: 4,
            author: "Sofia R.".to_string(),
            rating,
            date: "December 5, 2025".to_string(),
            title: "Worth it".to_string(),
            content: "Soft and warm.".to_string(),
            helpful: 3,
            verified: false,
        }
    }

    #[test]
    fn converts_fractional_rating() -> Result<(), FixtureError> {
        let review = Review::try_from(fixture(4.5))?;

        assert_eq!(review.rating, Decimal::new(45, 1));
        assert_eq!(review.helpful, 3);

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_ratings() {
        for rating in [-1.0, 5.5, f64::NAN] {
            assert!(
                matches!(
                    Review::try_from(fixture(rating)),
                    Err(FixtureError::InvalidRating { review: 4, .. })
                ),
                "{rating} should be rejected"
            );
        }
    }
}
