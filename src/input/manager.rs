//! Input manager for result sheets and rosters

use crate::error::{ApprovalFinderError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::document::Document;
use crate::processing::roster::Roster;
use log::{debug, info};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Roster path that reads from standard input.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Default)]
pub struct InputManager {
    documents_loaded: usize,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a result sheet. Every failure is reported as a document read
    /// error so the caller can skip the file and move on.
    pub async fn load_document(&mut self, path: &Path) -> Result<Document> {
        let id = document_id(path);

        if !path.exists() {
            return Err(ApprovalFinderError::document_read(id, "file does not exist"));
        }

        let pages = match self.detect_file_type(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract_pages(path).await
            }
            FileType::Text => {
                info!("Reading plain text sheet: {}", path.display());
                PlainTextExtractor.extract_pages(path).await
            }
            FileType::Unknown => {
                return Err(ApprovalFinderError::document_read(
                    id,
                    ApprovalFinderError::UnsupportedFormat(path.display().to_string()),
                ));
            }
        }
        .map_err(|e| match e {
            ApprovalFinderError::DocumentRead { reason, .. } => {
                ApprovalFinderError::DocumentRead { document: id.clone(), reason }
            }
            other => ApprovalFinderError::document_read(id.clone(), other),
        })?;

        debug!("Loaded {} page(s) from {}", pages.len(), id);
        self.documents_loaded += 1;
        Ok(Document::new(id, pages))
    }

    /// Read roster text from a file, or from stdin when `path` is `-`.
    pub async fn load_roster(&self, path: &Path) -> Result<Roster> {
        let text = if path.as_os_str() == STDIN_PATH {
            info!("Reading roster from standard input");
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        } else {
            if !path.exists() {
                return Err(ApprovalFinderError::InvalidInput(format!(
                    "Roster file does not exist: {}",
                    path.display()
                )));
            }
            info!("Reading roster: {}", path.display());
            tokio::fs::read_to_string(path).await?
        };

        let roster = Roster::parse(&text);
        debug!("Roster has {} entries ({} unique)", roster.len(), roster.unique_len());
        Ok(roster)
    }

    fn detect_file_type(&self, path: &Path) -> FileType {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    pub fn documents_loaded(&self) -> usize {
        self.documents_loaded
    }
}

/// The file name identifies a document in every report.
pub fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
