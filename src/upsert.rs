//! Insert-or-overwrite keyed by product name.
//!
//! A candidate whose name is already taken only replaces the stored record
//! when its timestamp is strictly newer. In confirm mode the user gets the
//! final say before anything is overwritten.

use crate::error::Result;
use crate::models::{NewProduct, Product};
use crate::store::{self, InsertOutcome};
use rusqlite::Connection;

/// Asks whether an existing record may be overwritten
pub trait OverwritePrompt {
    fn confirm_overwrite(&mut self, existing: &Product) -> Result<bool>;
}

impl<F> OverwritePrompt for F
where
    F: FnMut(&Product) -> bool,
{
    fn confirm_overwrite(&mut self, existing: &Product) -> Result<bool> {
        Ok(self(existing))
    }
}

/// How name conflicts are resolved
pub enum UpsertMode<'a> {
    /// Newer data overwrites without asking (CSV import)
    Silent,
    /// Newer data overwrites only after confirmation (interactive add)
    Confirm(&'a mut dyn OverwritePrompt),
}

/// Result of an upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was created; `position` is its ordinal in id order
    Inserted { id: i64, position: usize },
    /// The record with this id was replaced
    Overwritten { id: i64 },
    /// The candidate was newer but the user declined the overwrite
    Declined { id: i64 },
    /// The stored record is as new or newer; the candidate was dropped
    Discarded { id: i64 },
}

/// Offers a candidate to the store, resolving name conflicts by timestamp.
pub fn upsert(
    conn: &Connection,
    candidate: &NewProduct,
    mode: UpsertMode<'_>,
) -> Result<UpsertOutcome> {
    let existing = match store::insert_product(conn, candidate)? {
        InsertOutcome::Inserted(id) => {
            let position = store::count_products(conn)?;
            log::debug!("Inserted '{}' as id {}", candidate.name, id);
            return Ok(UpsertOutcome::Inserted { id, position });
        }
        InsertOutcome::NameConflict(existing) => existing,
    };

    if existing.updated_at >= candidate.updated_at {
        log::debug!(
            "Discarded '{}': stored record {} is not older ({} >= {})",
            candidate.name,
            existing.id,
            existing.updated_at,
            candidate.updated_at
        );
        return Ok(UpsertOutcome::Discarded { id: existing.id });
    }

    if let UpsertMode::Confirm(prompt) = mode {
        if !prompt.confirm_overwrite(&existing)? {
            log::debug!("Overwrite of record {} declined", existing.id);
            return Ok(UpsertOutcome::Declined { id: existing.id });
        }
    }

    store::replace_product(conn, existing.id, candidate)?;
    log::debug!("Overwrote record {} with newer '{}'", existing.id, candidate.name);
    Ok(UpsertOutcome::Overwritten { id: existing.id })
}
