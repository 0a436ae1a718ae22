//! CSV dataset loading for the four input tables.
//!
//! The pipeline consumes fully loaded, typed tables; this module produces
//! them from headered CSV files with trimmed fields and `YYYY-MM-DD` dates.
//! A table that cannot be opened or fails typed deserialization fails the
//! load as a whole, so the stages never see a partially populated table.
//! Expected files in a data directory:
//!   menu_items.csv, sales_transactions.csv, customer_feedback.csv,
//!   inventory.csv

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{LoadError, LoadResult};

pub const MENU_ITEMS_FILE: &str = "menu_items.csv";
pub const SALES_FILE: &str = "sales_transactions.csv";
pub const FEEDBACK_FILE: &str = "customer_feedback.csv";
pub const INVENTORY_FILE: &str = "inventory.csv";

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// A menu item as listed on the menu.
#[derive(Clone, Debug, Deserialize)]
pub struct MenuItem {
    pub item_id: u32,
    pub item_name: String,
    pub category: String,
    pub selling_price: f64,
    pub cost_price: f64,
}

/// One sales line. `menu_item_id` references a `MenuItem`, but the reference
/// is not enforced at load time; classification joins on it and ignores ids
/// that are not on the menu.
#[derive(Clone, Debug, Deserialize)]
pub struct SalesTransaction {
    pub transaction_id: u32,
    pub menu_item_id: u32,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub quantity: u32,
    pub total_price: f64,
}

/// One customer rating, optionally with free-text feedback.
#[derive(Clone, Debug, Deserialize)]
pub struct FeedbackRecord {
    pub menu_item_id: u32,
    /// 1.0–5.0 scale.
    pub rating: f64,
    /// Empty CSV fields load as `None`.
    pub feedback_text: Option<String>,
}

/// One stocked ingredient. Loaded alongside the other tables and carried on
/// the dataset for consumers; no analysis stage reads it yet.
#[derive(Clone, Debug, Deserialize)]
pub struct InventoryRecord {
    pub ingredient_id: u32,
    pub ingredient_name: String,
    pub quantity_on_hand: f64,
    pub unit: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub last_restocked: NaiveDate,
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The four tables one pipeline run consumes.
#[derive(Clone, Debug, Default)]
pub struct MenuDataset {
    pub menu_items: Vec<MenuItem>,
    pub sales: Vec<SalesTransaction>,
    pub feedback: Vec<FeedbackRecord>,
    pub inventory: Vec<InventoryRecord>,
}

impl MenuDataset {
    /// Load all four tables from their conventional file names under `dir`.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> LoadResult<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            menu_items: load_menu_items(open_table(dir, "menu_items", MENU_ITEMS_FILE)?)?,
            sales: load_sales(open_table(dir, "sales_transactions", SALES_FILE)?)?,
            feedback: load_feedback(open_table(dir, "customer_feedback", FEEDBACK_FILE)?)?,
            inventory: load_inventory(open_table(dir, "inventory", INVENTORY_FILE)?)?,
        })
    }
}

/// Load menu items from a CSV reader.
pub fn load_menu_items<R: Read>(reader: R) -> LoadResult<Vec<MenuItem>> {
    read_table("menu_items", reader)
}

/// Load sales transactions from a CSV reader.
pub fn load_sales<R: Read>(reader: R) -> LoadResult<Vec<SalesTransaction>> {
    read_table("sales_transactions", reader)
}

/// Load customer feedback from a CSV reader.
pub fn load_feedback<R: Read>(reader: R) -> LoadResult<Vec<FeedbackRecord>> {
    read_table("customer_feedback", reader)
}

/// Load inventory records from a CSV reader.
pub fn load_inventory<R: Read>(reader: R) -> LoadResult<Vec<InventoryRecord>> {
    read_table("inventory", reader)
}

fn open_table(dir: &Path, table: &'static str, file_name: &str) -> LoadResult<File> {
    let path = dir.join(file_name);
    File::open(&path).map_err(|source| LoadError::Io {
        table,
        path: path.display().to_string(),
        source,
    })
}

fn read_table<T: DeserializeOwned, R: Read>(table: &'static str, reader: R) -> LoadResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        // Header occupies line 1, so the first record is line 2.
        let record: T = result.map_err(|source| LoadError::Malformed {
            table,
            line: line_num + 2,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// `YYYY-MM-DD` date column deserializer.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("expected YYYY-MM-DD date, got '{}': {}", s, e)))
}
