//! Milliunit conversion
//!
//! YNAB reports every amount as an integer count of thousandths of the
//! currency unit. Conversion goes straight to `Decimal` so sums never pick up
//! floating-point drift before formatting.

use rust_decimal::Decimal;

use crate::constants::MILLIUNITS_PER_UNIT;

/// Convert milliunits to a currency amount (`units / 1000`)
pub fn to_decimal(units: i64) -> Decimal {
    Decimal::from(units) / Decimal::from(MILLIUNITS_PER_UNIT)
}

/// Convert category activity to spend.
///
/// Outflows are negative activity, so spending comes back positive.
pub fn outflow_to_spend(activity: i64) -> Decimal {
    -to_decimal(activity)
}
