//! Reference catalog of known items and their emission factors.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::models::report::CatalogEntry;

/// Columns the catalog header must contain.
const REQUIRED_COLUMNS: [&str; 4] = ["item", "category", "co2_per_unit", "unit"];

/// Shape of one CSV data row.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    item: String,
    category: String,
    co2_per_unit: f64,
    unit: String,
}

/// Immutable in-memory table of known items and per-unit CO2 factors.
///
/// Loaded once per process and shared read-only across all matches, so
/// concurrent reads need no locking. Item names are unique; when the
/// source contains duplicates the first row wins.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Load a catalog from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogError> {
        debug!("Loading catalog from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a catalog from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(CatalogError::MissingColumn(column.to_string()));
            }
        }

        let mut entries: Vec<CatalogEntry> = Vec::new();
        let mut index = HashMap::new();

        for row in csv_reader.deserialize() {
            let row: CatalogRow = row?;
            if index.contains_key(&row.item) {
                warn!(
                    "Duplicate catalog item '{}', keeping first occurrence",
                    row.item
                );
                continue;
            }
            index.insert(row.item.clone(), entries.len());
            entries.push(CatalogEntry {
                item: row.item,
                category: row.category,
                co2_per_unit: row.co2_per_unit,
                unit: row.unit,
            });
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        debug!("Loaded {} catalog entries", entries.len());
        Ok(Self { entries, index })
    }

    /// All entries in load order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up an entry by its exact item name.
    pub fn lookup(&self, name: &str) -> Option<&CatalogEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
