//! Product Inventory - single-user stock database
//!
//! Loads products from a CSV file into SQLite, resolves name conflicts by
//! timestamp, and offers ordinal lookups, interactive adds and CSV backups.

pub mod csv_io;
pub mod currency;
pub mod dates;
pub mod error;
pub mod formatters;
pub mod lookup;
pub mod models;
pub mod shell;
pub mod store;
pub mod upsert;

pub use csv_io::{export_csv, import_backup, import_csv, ImportStats};
pub use error::{InventoryError, Result};
pub use lookup::lookup;
pub use models::{NewProduct, Product};
pub use shell::Shell;
pub use upsert::{upsert, OverwritePrompt, UpsertMode, UpsertOutcome};
