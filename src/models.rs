use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

/// A product as stored in the database
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Store-assigned surrogate key, ascending in insertion order
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    pub price_cents: u64,
    pub updated_at: NaiveDateTime,
}

/// A candidate product that has not been written yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub quantity: f64,
    pub price_cents: u64,
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        price_cents: u64,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            price_cents,
            updated_at,
        }
    }
}

/// One row of the startup inventory CSV, read by position:
/// name, display price, quantity, `MM/DD/YYYY` date.
#[derive(Debug, Deserialize, Clone)]
pub struct InventoryRow {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub date_updated: String,
}

/// One row of a backup CSV. Field names double as the header.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackupRow {
    pub product_id: i64,
    pub product_name: String,
    #[serde(serialize_with = "quantity_as_display")]
    pub product_quantity: f64,
    pub product_price: u64,
    pub date_updated: String,
}

/// Writes quantities the way the view screen shows them: `43`, not `43.0`.
fn quantity_as_display<S: Serializer>(quantity: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(quantity)
}

/// Header written at the top of every backup file
pub const BACKUP_HEADER: [&str; 5] = [
    "product_id",
    "product_name",
    "product_quantity",
    "product_price",
    "date_updated",
];

/// Converts Python-style title case: the first letter of every run of
/// letters is upper-cased, the rest lower-cased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
