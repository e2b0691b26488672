//! Error types for the recarbo-core library.

use thiserror::Error;

/// Main error type for the recarbo library.
#[derive(Error, Debug)]
pub enum RecarboError {
    /// Reference catalog loading error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Text extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while loading the reference catalog.
///
/// Any of these is fatal at startup: the pipeline must not serve requests
/// without a loaded catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog source could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not valid CSV or a row failed to parse.
    #[error("malformed catalog: {0}")]
    Malformed(#[from] csv::Error),

    /// A required column is missing from the header.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// The catalog contains no data rows.
    #[error("catalog has no entries")]
    Empty,
}

/// Errors raised by text-extraction engines.
///
/// Propagated verbatim to the caller of `process()`; never retried
/// internally. An unmatched item is not an error, only extraction is.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The engine could not be initialized.
    #[error("failed to initialize OCR engine: {0}")]
    Init(String),

    /// The image could not be decoded or is unsupported.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The engine failed while recognizing text.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Result type for the recarbo library.
pub type Result<T> = std::result::Result<T, RecarboError>;
