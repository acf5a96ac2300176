//! Currency conversion between display strings and integer cents.
//!
//! Prices are stored as whole cents so no floating point ever touches money.

use crate::error::{InventoryError, Result};
use log::{debug, warn};

/// Converts a display price such as "$1.23" into a cent count.
///
/// Every non-digit character is dropped and the remaining digits are read as
/// cents. Inputs of two characters or fewer (after trimming) are rejected,
/// which also rejects short but otherwise valid amounts like "5".
///
/// # Arguments
/// * `display` - A price string like "$4.99" or "12.50"
///
/// # Returns
/// The number of cents, or a `Format` error.
pub fn decode_to_cents(display: &str) -> Result<u64> {
    let trimmed = display.trim();
    if trimmed.chars().count() <= 2 {
        warn!("Price '{display}' is too short to hold dollars and cents");
        return Err(InventoryError::format(format!(
            "price '{display}' is too short, expected something like $1.23"
        )));
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    let cents = digits
        .parse::<u64>()
        .map_err(|e| InventoryError::format(format!("price '{display}' is not a number: {e}")))?;

    debug!("Decoded price '{display}' to {cents} cents");
    Ok(cents)
}

/// Renders a cent count as "$D.CC".
///
/// The count is zero-padded to three digits first, so 5 becomes "$0.05".
pub fn encode_from_cents(cents: u64) -> String {
    let padded = format!("{cents:03}");
    let (dollars, rest) = padded.split_at(padded.len() - 2);
    format!("${dollars}.{rest}")
}

#[cfg(test)]
#[path = "currency_tests.rs"]
mod tests;
