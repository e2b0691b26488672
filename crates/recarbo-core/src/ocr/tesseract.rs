//! Tesseract-backed text extraction via `leptess`.

use std::sync::Mutex;

use leptess::LepTess;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::OcrConfig;

use super::TextExtractor;

/// Text extractor backed by the Tesseract OCR engine.
///
/// The underlying `LepTess` handle requires `&mut` access, so one engine
/// serializes its OCR calls behind a mutex. Construct one engine per worker
/// when extraction throughput matters.
pub struct TesseractEngine {
    tess: Mutex<LepTess>,
    languages: String,
}

impl TesseractEngine {
    /// Create an engine for the given Tesseract language string.
    pub fn new(languages: &str) -> Result<Self, ExtractionError> {
        Self::with_data_path(languages, None)
    }

    /// Create an engine from pipeline configuration.
    pub fn from_config(config: &OcrConfig) -> Result<Self, ExtractionError> {
        let data_path = config.data_path.as_ref().and_then(|p| p.to_str());
        Self::with_data_path(&config.languages, data_path)
    }

    /// Create an engine with an explicit tessdata directory.
    pub fn with_data_path(
        languages: &str,
        data_path: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        let tess = LepTess::new(data_path, languages)
            .map_err(|e| ExtractionError::Init(e.to_string()))?;

        info!("Initialized Tesseract engine (languages: {})", languages);

        Ok(Self {
            tess: Mutex::new(tess),
            languages: languages.to_string(),
        })
    }

    /// The language string this engine was created with.
    pub fn languages(&self) -> &str {
        &self.languages
    }
}

impl TextExtractor for TesseractEngine {
    fn extract_text(&self, image: &[u8]) -> Result<String, ExtractionError> {
        let mut tess = self
            .tess
            .lock()
            .map_err(|_| ExtractionError::Recognition("OCR engine lock poisoned".to_string()))?;

        tess.set_image_from_mem(image)
            .map_err(|e| ExtractionError::InvalidImage(e.to_string()))?;

        let text = tess
            .get_utf8_text()
            .map_err(|e| ExtractionError::Recognition(e.to_string()))?;

        debug!("Tesseract extracted {} characters", text.len());
        Ok(text)
    }
}
