//! Core library for receipt carbon-footprint estimation.
//!
//! This crate provides:
//! - Text extraction from receipt images (Tesseract behind a trait)
//! - Noise filtering of raw OCR text into candidate item lines
//! - Fuzzy matching of candidates against a CO2 reference catalog
//! - Aggregation of per-item emissions into a report

pub mod catalog;
pub mod error;
pub mod models;
pub mod ocr;
pub mod pipeline;

pub use catalog::Catalog;
pub use error::{CatalogError, ExtractionError, RecarboError, Result};
pub use models::config::{CatalogConfig, MatchingConfig, OcrConfig, RecarboConfig};
pub use models::report::{CatalogEntry, ProcessResult, Report, ResolvedItem};
pub use ocr::TextExtractor;
pub use pipeline::{
    ItemMatcher, LineFilter, LineMatch, ReceiptProcessor, SimilarityScorer, TokenSetScorer,
    DEFAULT_MATCH_THRESHOLD,
};

#[cfg(feature = "native")]
pub use ocr::TesseractEngine;
