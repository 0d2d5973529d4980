//! Page text extraction from result sheets

use crate::error::{ApprovalFinderError, Result};
use std::any::Any;
use std::panic;
use std::path::Path;
use tokio::fs;

/// Page separator in plain-text sheets.
const FORM_FEED: char = '\u{c}';

pub trait TextExtractor {
    fn extract_pages(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| ApprovalFinderError::document_read(path.display().to_string(), e))?;

        let pages = tokio::task::spawn_blocking(move || PdfExtractor::pages_from_bytes(&bytes))
            .await
            .map_err(|e| ApprovalFinderError::document_read(path.display().to_string(), e))?
            .map_err(|reason| ApprovalFinderError::document_read(path.display().to_string(), reason))?;
        Ok(pages)
    }
}

impl PdfExtractor {
    /// Extract the text of an in-memory PDF.
    ///
    /// `pdf-extract` panics on some PDFs it cannot interpret (missing font
    /// resources, for one); that panic is reported as an ordinary error.
    pub fn pages_from_bytes(bytes: &[u8]) -> std::result::Result<Vec<String>, String> {
        let text = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|payload| format!("PDF text extraction panicked: {}", panic_message(payload.as_ref())))?
            .map_err(|e| format!("Failed to extract text from PDF: {}", e))?;
        Ok(vec![text])
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown cause"
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ApprovalFinderError::document_read(path.display().to_string(), e))?;

        Ok(split_pages(&content))
    }
}

fn split_pages(content: &str) -> Vec<String> {
    content.split(FORM_FEED).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("MARIA SILVA\n\u{c}CARLOS DIAS\n");

        assert_eq!(pages, vec!["MARIA SILVA\n", "CARLOS DIAS\n"]);
    }

    #[test]
    fn test_garbage_bytes_are_not_a_pdf() {
        let result = PdfExtractor::pages_from_bytes(b"this is not a pdf at all");

        assert!(result.is_err());
    }

    #[test]
    fn test_pdf_without_font_resources_is_an_error() {
        let bytes = include_bytes!("../../tests/fixtures/sem_fonte.pdf");

        let result = PdfExtractor::pages_from_bytes(bytes);

        assert!(result.is_err());
    }
}
