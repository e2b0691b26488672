//! Text extraction from receipt images.

#[cfg(feature = "native")]
mod tesseract;

#[cfg(feature = "native")]
pub use tesseract::TesseractEngine;

use crate::error::ExtractionError;

/// Extracts raw multi-line text from an encoded receipt image.
///
/// The image is opaque bytes to the pipeline; decoding belongs to the
/// engine. Implementations must be deterministic for the same input so
/// repeated invocations yield identical reports.
pub trait TextExtractor: Send + Sync {
    /// Extract text from encoded image bytes (PNG, JPEG, ...).
    fn extract_text(&self, image: &[u8]) -> Result<String, ExtractionError>;
}

impl<T: TextExtractor + ?Sized> TextExtractor for &T {
    fn extract_text(&self, image: &[u8]) -> Result<String, ExtractionError> {
        (**self).extract_text(image)
    }
}

impl<T: TextExtractor + ?Sized> TextExtractor for Box<T> {
    fn extract_text(&self, image: &[u8]) -> Result<String, ExtractionError> {
        (**self).extract_text(image)
    }
}

impl<T: TextExtractor + ?Sized> TextExtractor for std::sync::Arc<T> {
    fn extract_text(&self, image: &[u8]) -> Result<String, ExtractionError> {
        (**self).extract_text(image)
    }
}
