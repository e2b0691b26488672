//! Report data models: catalog entries, resolved items, and the final report.

use serde::{Deserialize, Serialize};

/// One reference row mapping an item name to its emission data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Canonical item name, unique within the catalog.
    pub item: String,

    /// Emission category (e.g. "Dairy", "Produce").
    pub category: String,

    /// CO2 emitted per unit, in kilograms.
    pub co2_per_unit: f64,

    /// Unit of measure the factor applies to (e.g. "kg", "liter").
    pub unit: String,
}

/// The outcome of matching one candidate line.
///
/// Either a copy of a matched [`CatalogEntry`] or a zero-emission
/// placeholder carrying the original candidate text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    /// Catalog item name, or the raw candidate text when unmatched.
    pub item: String,

    /// Emission category, `"Unknown"` when unmatched.
    pub category: String,

    /// CO2 per unit, `0` when unmatched.
    pub co2_per_unit: f64,

    /// Unit of measure, `"-"` when unmatched.
    pub unit: String,

    /// Purchased quantity. Always 1: quantity parsing is out of scope.
    pub quantity: u32,

    /// Emissions attributed to this line.
    pub total_co2: f64,
}

impl ResolvedItem {
    /// Resolve to a catalog-backed item for a single unit.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            item: entry.item.clone(),
            category: entry.category.clone(),
            co2_per_unit: entry.co2_per_unit,
            unit: entry.unit.clone(),
            quantity: 1,
            total_co2: entry.co2_per_unit,
        }
    }

    /// Zero-emission placeholder for a line no catalog entry matched.
    pub fn unknown(line: impl Into<String>) -> Self {
        Self {
            item: line.into(),
            category: "Unknown".to_string(),
            co2_per_unit: 0.0,
            unit: "-".to_string(),
            quantity: 1,
            total_co2: 0.0,
        }
    }
}

/// Aggregated emission report for one receipt.
///
/// Serializes to `{"items": [...], "total_co2": n}` with items in receipt
/// order. Created fresh per invocation; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Resolved items in the order their lines appeared on the receipt.
    pub items: Vec<ResolvedItem>,

    /// Sum of the items' `total_co2` values.
    pub total_co2: f64,
}

impl Report {
    /// Build a report from resolved items, summing their emissions.
    pub fn from_items(items: Vec<ResolvedItem>) -> Self {
        let total_co2 = items.iter().map(|i| i.total_co2).sum();
        Self { items, total_co2 }
    }

    /// A report with no items.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_co2: 0.0,
        }
    }
}

/// Result of one pipeline invocation.
///
/// Carries diagnostics alongside the report so the wire format of
/// [`Report`] stays clean.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// The aggregated emission report.
    pub report: Report,

    /// Raw text returned by the extraction engine.
    pub raw_text: String,

    /// Number of candidate lines that survived filtering.
    pub candidate_count: usize,

    /// Number of candidates that resolved to the unknown placeholder.
    pub unmatched_count: usize,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry() -> CatalogEntry {
        CatalogEntry {
            item: "Milk".to_string(),
            category: "Dairy".to_string(),
            co2_per_unit: 1.2,
            unit: "liter".to_string(),
        }
    }

    #[test]
    fn test_resolved_from_entry() {
        let resolved = ResolvedItem::from_entry(&entry());
        assert_eq!(resolved.item, "Milk");
        assert_eq!(resolved.quantity, 1);
        assert_eq!(resolved.total_co2, 1.2);
        assert_eq!(resolved.total_co2, resolved.co2_per_unit);
    }

    #[test]
    fn test_resolved_unknown() {
        let resolved = ResolvedItem::unknown("Bread");
        assert_eq!(resolved.item, "Bread");
        assert_eq!(resolved.category, "Unknown");
        assert_eq!(resolved.co2_per_unit, 0.0);
        assert_eq!(resolved.unit, "-");
        assert_eq!(resolved.quantity, 1);
        assert_eq!(resolved.total_co2, 0.0);
    }

    #[test]
    fn test_report_totals() {
        let report = Report::from_items(vec![
            ResolvedItem::from_entry(&entry()),
            ResolvedItem::unknown("Bread"),
        ]);
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.total_co2, 1.2);

        let summed: f64 = report.items.iter().map(|i| i.total_co2).sum();
        assert_eq!(report.total_co2, summed);
    }

    #[test]
    fn test_empty_report() {
        let report = Report::empty();
        assert!(report.items.is_empty());
        assert_eq!(report.total_co2, 0.0);
        assert_eq!(report, Report::from_items(Vec::new()));
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report::from_items(vec![ResolvedItem::from_entry(&entry())]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "items": [{
                    "item": "Milk",
                    "category": "Dairy",
                    "co2_per_unit": 1.2,
                    "unit": "liter",
                    "quantity": 1,
                    "total_co2": 1.2,
                }],
                "total_co2": 1.2,
            })
        );
    }
}
