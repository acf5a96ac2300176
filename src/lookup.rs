//! Ordinal lookup: the user types a position, not a database id.

use crate::error::{InventoryError, Result};
use crate::models::Product;
use crate::store;
use rusqlite::Connection;

/// Resolves user text to the record at that 1-based position in id order.
///
/// The sign is ignored, so "-2" finds the same record as "2". Returns the
/// resolved position together with the record.
pub fn lookup(conn: &Connection, ordinal_text: &str) -> Result<(u64, Product)> {
    let text = ordinal_text.trim();
    let position = text
        .parse::<i64>()
        .map_err(|_| InventoryError::format(format!("'{text}' is not a whole number")))?
        .unsigned_abs();

    match store::product_at_position(conn, position)? {
        Some(product) => Ok((position, product)),
        None => Err(InventoryError::OutOfRange {
            position,
            count: store::count_products(conn)?,
        }),
    }
}
