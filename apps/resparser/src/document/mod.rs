//! Text-extraction collaborator: turns PDF/DOCX/DOC bytes into plain text.
//!
//! Extraction never fails outward. A malformed document yields empty (or partial)
//! text and a warning; downstream extractors then simply find nothing.

mod doc;
mod docx;

#[cfg(test)]
pub(crate) use docx::docx_bytes;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported document format '{0}'")]
    Unsupported(String),

    #[error("PDF decode error: {0}")]
    Pdf(String),

    #[error("DOCX decode error: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    Unsupported,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            "doc" => DocumentFormat::Doc,
            _ => DocumentFormat::Unsupported,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentFormat::Unsupported)
    }

    pub fn is_supported(self) -> bool {
        self != DocumentFormat::Unsupported
    }
}

/// Extracts normalised text. Decoder failures (including decoder panics) become empty text.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> String {
    match try_extract_text(bytes, format) {
        Ok(text) => normalize_text(&text),
        Err(DocumentError::Unsupported(ext)) => {
            debug!("No text extractor for format '{ext}'");
            String::new()
        }
        Err(e) => {
            warn!("Text extraction failed, continuing with empty text: {e}");
            String::new()
        }
    }
}

fn try_extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, DocumentError> {
    match format {
        DocumentFormat::Pdf => extract_pdf(bytes),
        DocumentFormat::Docx => docx::extract(bytes),
        DocumentFormat::Doc => Ok(doc::extract(bytes)),
        DocumentFormat::Unsupported => Err(DocumentError::Unsupported("unknown".to_string())),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, DocumentError> {
    // pdf-extract panics on some malformed inputs.
    panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|_| DocumentError::Pdf("decoder panicked".to_string()))?
        .map_err(|e| DocumentError::Pdf(e.to_string()))
}

/// Page count for PDFs; `None` for every other format or an unreadable PDF.
pub fn page_count(bytes: &[u8], format: DocumentFormat) -> Option<u32> {
    if format != DocumentFormat::Pdf {
        return None;
    }
    match lopdf::Document::load_mem(bytes) {
        Ok(doc) => u32::try_from(doc.get_pages().len()).ok(),
        Err(e) => {
            debug!("Page count unavailable: {e}");
            None
        }
    }
}

/// Repairs ligatures and typographic punctuation, keeping the line structure intact.
pub fn normalize_text(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2013}', '\u{2014}'], "-")
        .replace('\u{2026}', "...")
        .replace(['\u{00A0}', '\t'], " ")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}
