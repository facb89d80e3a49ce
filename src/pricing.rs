//! Pricing

use rusty_money::{Money, MoneyError, iso};
use thiserror::Error;

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total does not fit in minor units.
    #[error("line total overflowed for {quantity} x {unit_minor} minor units")]
    Overflow {
        /// Unit price in minor units
        unit_minor: i64,

        /// Quantity being priced
        quantity: u32,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates `price × quantity`.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the result does not fit in minor units.
pub fn line_total<'a>(
    price: Money<'a, iso::Currency>,
    quantity: u32,
) -> Result<Money<'a, iso::Currency>, TotalPriceError> {
    let unit_minor = price.to_minor_units();

    let total = unit_minor
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow {
            unit_minor,
            quantity,
        })?;

    Ok(Money::from_minor(total, price.currency()))
}

/// Sums `price × quantity` over a set of lines, starting from zero in `currency`.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total did not fit in minor units.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    lines: impl IntoIterator<Item = (Money<'a, iso::Currency>, u32)>,
    currency: &'a iso::Currency,
) -> Result<Money<'a, iso::Currency>, TotalPriceError> {
    lines
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, (price, quantity)| {
            Ok(acc.add(line_total(price, quantity)?)?)
        })
}
