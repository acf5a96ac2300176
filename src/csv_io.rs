//! CSV import and backup export
//!
//! Imports run inside a single transaction: a bad row aborts the whole file
//! and leaves the database as it was before the import started.

use crate::currency::decode_to_cents;
use crate::dates::{format_backup_timestamp, parse_backup_timestamp, parse_display_date};
use crate::error::{InventoryError, Result};
use crate::models::{BackupRow, InventoryRow, NewProduct, BACKUP_HEADER};
use crate::store;
use crate::upsert::{upsert, UpsertMode, UpsertOutcome};
use csv::StringRecord;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Statistics from an import
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    /// Rows that created a new record
    pub inserted: usize,
    /// Rows that replaced an older record of the same name
    pub overwritten: usize,
    /// Rows dropped because the stored record was as new or newer
    pub discarded: usize,
}

impl ImportStats {
    fn record(&mut self, outcome: &UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted { .. } => self.inserted += 1,
            UpsertOutcome::Overwritten { .. } => self.overwritten += 1,
            UpsertOutcome::Declined { .. } | UpsertOutcome::Discarded { .. } => {
                self.discarded += 1
            }
        }
    }

    /// Number of data rows processed
    pub fn total(&self) -> usize {
        self.inserted + self.overwritten + self.discarded
    }
}

fn parse_quantity(s: &str) -> Result<f64> {
    match s.parse::<f64>() {
        Ok(q) if q.is_finite() && q >= 0.0 => Ok(q),
        Ok(q) => Err(InventoryError::format(format!(
            "quantity {q} must be a non-negative number"
        ))),
        Err(e) => Err(InventoryError::format(format!(
            "quantity '{s}' is not a number: {e}"
        ))),
    }
}

fn inventory_candidate(row: InventoryRow) -> Result<NewProduct> {
    Ok(NewProduct {
        price_cents: decode_to_cents(&row.price)?,
        quantity: parse_quantity(&row.quantity)?,
        updated_at: parse_display_date(&row.date_updated)?,
        name: row.name,
    })
}

fn backup_candidate(row: BackupRow) -> Result<NewProduct> {
    if !row.product_quantity.is_finite() || row.product_quantity < 0.0 {
        return Err(InventoryError::format(format!(
            "quantity {} must be a non-negative number",
            row.product_quantity
        )));
    }
    Ok(NewProduct {
        quantity: row.product_quantity,
        price_cents: row.product_price,
        updated_at: parse_backup_timestamp(&row.date_updated)?,
        name: row.product_name,
    })
}

fn leading_fields(record: StringRecord, columns: usize) -> Result<StringRecord> {
    if record.len() < columns {
        return Err(InventoryError::format(format!(
            "expected {columns} columns, found {}",
            record.len()
        )));
    }
    Ok(record.iter().take(columns).collect())
}

/// Reads every data row by position and upserts it silently, all in one transaction.
///
/// Only the first `columns` fields are read; trailing extras are ignored.
fn import_rows<T, F>(
    conn: &mut Connection,
    path: &Path,
    columns: usize,
    to_candidate: F,
) -> Result<ImportStats>
where
    T: DeserializeOwned,
    F: Fn(T) -> Result<NewProduct>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let tx = conn.transaction()?;
    let mut stats = ImportStats::default();

    for (index, result) in rdr.records().enumerate() {
        let row = index + 1;
        let candidate = result
            .map_err(InventoryError::from)
            .and_then(|record| leading_fields(record, columns))
            .and_then(|record| record.deserialize::<T>(None).map_err(InventoryError::from))
            .and_then(&to_candidate)
            .map_err(|e| e.at_row(row))?;

        let outcome = upsert(&tx, &candidate, UpsertMode::Silent).map_err(|e| e.at_row(row))?;
        stats.record(&outcome);
    }

    tx.commit()?;
    log::info!(
        "Imported {}: {} inserted, {} overwritten, {} discarded",
        path.display(),
        stats.inserted,
        stats.overwritten,
        stats.discarded
    );
    Ok(stats)
}

/// Imports a startup inventory CSV.
///
/// The header row is skipped. Columns are read by position:
/// name, display price, quantity, `MM/DD/YYYY` date.
pub fn import_csv(conn: &mut Connection, path: impl AsRef<Path>) -> Result<ImportStats> {
    import_rows(conn, path.as_ref(), 4, inventory_candidate)
}

/// Restores records from a file written by [`export_csv`].
///
/// The `product_id` column is ignored; ids are assigned afresh.
pub fn import_backup(conn: &mut Connection, path: impl AsRef<Path>) -> Result<ImportStats> {
    import_rows(conn, path.as_ref(), BACKUP_HEADER.len(), backup_candidate)
}

/// Writes every record, ordered by id, to a backup CSV.
///
/// An existing file is overwritten. Returns the number of data rows written.
pub fn export_csv(conn: &Connection, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let products = store::all_products(conn)?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(BACKUP_HEADER)?;
    for product in &products {
        wtr.serialize(BackupRow {
            product_id: product.id,
            product_name: product.name.clone(),
            product_quantity: product.quantity,
            product_price: product.price_cents,
            date_updated: format_backup_timestamp(&product.updated_at),
        })?;
    }
    wtr.flush()?;

    log::info!("Backed up {} records to {}", products.len(), path.display());
    Ok(products.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_accepts_fractions() {
        assert_eq!(parse_quantity("2.5").unwrap(), 2.5);
        assert_eq!(parse_quantity("0").unwrap(), 0.0);
    }

    #[test]
    fn quantity_rejects_negative_and_non_finite() {
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("NaN").is_err());
        assert!(parse_quantity("inf").is_err());
        assert!(parse_quantity("lots").is_err());
    }

    #[test]
    fn stats_total_sums_outcomes() {
        let mut stats = ImportStats::default();
        stats.record(&UpsertOutcome::Inserted { id: 1, position: 1 });
        stats.record(&UpsertOutcome::Overwritten { id: 1 });
        stats.record(&UpsertOutcome::Discarded { id: 1 });
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.discarded, 1);
    }
}
