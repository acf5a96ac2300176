//! SQLite storage for product records
//!
//! A single `products` table with a surrogate `id` and a `UNIQUE` name.
//! Every function takes the connection explicitly; tests pass an in-memory one.

use crate::dates;
use crate::error::Result;
use crate::models::{NewProduct, Product};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// Result type for database operations
pub type DbResult<T> = rusqlite::Result<T>;

const SELECT_COLUMNS: &str = "SELECT id, name, quantity, price_cents, updated_at FROM products";

/// What happened when a new product was offered to the store
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// The row was written under the given id
    Inserted(i64),
    /// Another live record already holds this name; nothing was written
    NameConflict(Product),
}

/// Opens (or creates) the database file and initialises the schema.
pub fn open(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            log::info!("Created directory: {}", parent.display());
        }
    }
    let conn = Connection::open(path)?;
    log::info!("Opened database: {}", path.display());
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates the `products` table if it does not already exist.
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS products (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE CHECK (length(name) > 0),
            quantity    REAL NOT NULL CHECK (quantity >= 0),
            price_cents INTEGER NOT NULL CHECK (price_cents >= 0),
            updated_at  TEXT NOT NULL
        );",
    )?;
    log::debug!("Database schema initialized");
    Ok(())
}

fn cents_to_sql(cents: u64) -> DbResult<i64> {
    i64::try_from(cents).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn product_from_row(row: &Row<'_>) -> DbResult<Product> {
    let cents: i64 = row.get(3)?;
    let price_cents = u64::try_from(cents)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e)))?;
    let raw: String = row.get(4)?;
    let updated_at = dates::from_storage(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            format!("unreadable timestamp '{raw}'").into(),
        )
    })?;
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        price_cents,
        updated_at,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Inserts a new product, reporting a name collision as a value instead of an error.
pub fn insert_product(conn: &Connection, product: &NewProduct) -> DbResult<InsertOutcome> {
    let result = conn.execute(
        "INSERT INTO products (name, quantity, price_cents, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            product.name,
            product.quantity,
            cents_to_sql(product.price_cents)?,
            dates::to_storage(&product.updated_at),
        ],
    );

    match result {
        Ok(_) => Ok(InsertOutcome::Inserted(conn.last_insert_rowid())),
        Err(e) if is_unique_violation(&e) => match find_by_name(conn, &product.name)? {
            Some(existing) => Ok(InsertOutcome::NameConflict(existing)),
            None => Err(e),
        },
        Err(e) => Err(e),
    }
}

/// Replaces every field of the record with the given id.
///
/// Returns `false` when no such record exists.
pub fn replace_product(conn: &Connection, id: i64, product: &NewProduct) -> DbResult<bool> {
    let changed = conn.execute(
        "UPDATE products
         SET name = ?1, quantity = ?2, price_cents = ?3, updated_at = ?4
         WHERE id = ?5",
        params![
            product.name,
            product.quantity,
            cents_to_sql(product.price_cents)?,
            dates::to_storage(&product.updated_at),
            id,
        ],
    )?;
    Ok(changed == 1)
}

/// Looks up the live record holding `name`
pub fn find_by_name(conn: &Connection, name: &str) -> DbResult<Option<Product>> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE name = ?1"),
        params![name],
        product_from_row,
    )
    .optional()
}

/// All records in ascending id order
pub fn all_products(conn: &Connection) -> DbResult<Vec<Product>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
    let products = stmt
        .query_map([], product_from_row)?
        .collect::<DbResult<Vec<_>>>()?;
    Ok(products)
}

/// The record at a 1-based position in ascending id order
pub fn product_at_position(conn: &Connection, position: u64) -> DbResult<Option<Product>> {
    if position == 0 {
        return Ok(None);
    }
    let offset = i64::try_from(position - 1).unwrap_or(i64::MAX);
    conn.query_row(
        &format!("{SELECT_COLUMNS} ORDER BY id LIMIT 1 OFFSET ?1"),
        params![offset],
        product_from_row,
    )
    .optional()
}

/// Number of stored records
pub fn count_products(conn: &Connection) -> DbResult<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |r| r.get(0))?;
    Ok(count.max(0) as usize)
}
