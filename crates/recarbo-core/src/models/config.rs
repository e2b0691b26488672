//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the recarbo pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecarboConfig {
    /// Reference catalog configuration.
    pub catalog: CatalogConfig,

    /// Matching configuration.
    pub matching: MatchingConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,
}

impl Default for RecarboConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            matching: MatchingConfig::default(),
            ocr: OcrConfig::default(),
        }
    }
}

/// Reference catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the emission factor CSV.
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("catalog.csv"),
        }
    }
}

/// Matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum similarity score a match must exceed (strictly greater).
    pub threshold: u8,

    /// Lowercase substrings that mark a line as receipt noise.
    pub noise_markers: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 70,
            noise_markers: vec![
                "total".to_string(),
                "subtotal".to_string(),
                "tax".to_string(),
            ],
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language string (e.g. "eng", "eng+deu").
    pub languages: String,

    /// Directory containing Tesseract language data, if not the system one.
    pub data_path: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: "eng".to_string(),
            data_path: None,
        }
    }
}

impl RecarboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
