//! Error types for product_inventory

use thiserror::Error;

/// Unified error type for inventory operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Malformed currency, date, integer or quantity input
    #[error("Format error: {0}")]
    Format(String),
    /// Ordinal lookup past the end of the record set
    #[error("Position {position} is out of range ({count} records stored)")]
    OutOfRange { position: u64, count: usize },
    /// A CSV import row failed; the whole import was rolled back
    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<InventoryError>,
    },
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// CSV reading or writing failed
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        InventoryError::Format(msg.into())
    }

    /// Wraps an error with the 1-based data row it came from
    pub(crate) fn at_row(self, row: usize) -> Self {
        InventoryError::Row {
            row,
            source: Box::new(self),
        }
    }
}

/// Result alias for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
