//! Per-document approval checking and run aggregation

use crate::error::{ApprovalFinderError, Result};
use crate::input::manager::{document_id, InputManager};
use crate::processing::document::Document;
use crate::processing::extractor::{NameExtractor, NameFilter};
use crate::processing::matcher::{match_roster, MatchRecord};
use crate::processing::progress::ProgressCallback;
use crate::processing::roster::Roster;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Matches found in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub document_id: String,
    pub names_extracted: usize,
    pub matches: Vec<MatchRecord>,
}

/// A document that was skipped because it could not be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub document_id: String,
    pub reason: String,
}

impl DocumentFailure {
    fn from_error(fallback_id: &str, error: ApprovalFinderError) -> Self {
        match error {
            ApprovalFinderError::DocumentRead { document, reason } => Self {
                document_id: document,
                reason,
            },
            other => Self {
                document_id: fallback_id.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Nothing to do: the roster has no names or no documents were given.
    EmptyInput,
    /// Documents were checked but no roster name was found in any of them.
    NoMatches,
    Matches,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub roster_size: usize,
    pub unique_roster_size: usize,
    pub documents: Vec<DocumentOutcome>,
    pub failures: Vec<DocumentFailure>,
}

impl RunSummary {
    pub fn new(roster: &Roster) -> Self {
        Self {
            roster_size: roster.len(),
            unique_roster_size: roster.unique_len(),
            documents: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Summary for a run that never started.
    pub fn empty() -> Self {
        Self {
            roster_size: 0,
            unique_roster_size: 0,
            documents: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn roster_size(&self) -> usize {
        self.roster_size
    }

    pub fn total_matches(&self) -> usize {
        self.documents.iter().map(|d| d.matches.len()).sum()
    }

    /// Match count per document, in processing order.
    pub fn per_document_counts(&self) -> Vec<(&str, usize)> {
        self.documents
            .iter()
            .map(|d| (d.document_id.as_str(), d.matches.len()))
            .collect()
    }

    /// Every record, grouped per document in processing order.
    pub fn records(&self) -> impl Iterator<Item = &MatchRecord> {
        self.documents.iter().flat_map(|d| d.matches.iter())
    }

    pub fn failures(&self) -> &[DocumentFailure] {
        &self.failures
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.documents.is_empty() && self.failures.is_empty() {
            RunOutcome::EmptyInput
        } else if self.total_matches() == 0 {
            RunOutcome::NoMatches
        } else {
            RunOutcome::Matches
        }
    }
}

pub struct ApprovalChecker {
    roster: Roster,
    extractor: NameExtractor,
}

impl ApprovalChecker {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            extractor: NameExtractor::new(),
        }
    }

    pub fn with_filter(mut self, filter: NameFilter) -> Self {
        self.extractor = self.extractor.with_filter(filter);
        self
    }

    pub fn check_document(&self, document: &Document) -> DocumentOutcome {
        let extracted = self.extractor.extract(document);
        let matches = match_roster(self.roster.names(), &extracted, &document.id);

        debug!(
            "{}: {} name(s) extracted, {} approved",
            document.id,
            extracted.len(),
            matches.len()
        );

        DocumentOutcome {
            document_id: document.id.clone(),
            names_extracted: extracted.len(),
            matches,
        }
    }

    /// Check documents that are already loaded. A failed load is recorded
    /// and the remaining documents are still checked.
    pub fn run<I>(&self, documents: I, progress: &dyn ProgressCallback) -> RunSummary
    where
        I: IntoIterator<Item = Result<Document>>,
    {
        let mut summary = RunSummary::new(&self.roster);

        for (idx, document) in documents.into_iter().enumerate() {
            let fallback_id = format!("document #{}", idx + 1);
            self.record(&mut summary, document, &fallback_id);
            progress.inc(1);
        }

        summary
    }

    /// Load and check each path in order.
    pub async fn process_paths(
        &self,
        manager: &mut InputManager,
        paths: &[PathBuf],
        progress: &dyn ProgressCallback,
    ) -> RunSummary {
        let mut summary = RunSummary::new(&self.roster);
        progress.set_total(paths.len() as u64);
        info!("Checking {} document(s) against {} roster name(s)", paths.len(), self.roster.len());

        for path in paths {
            let id = document_id(path);
            progress.set_message(id.clone());
            let document = manager.load_document(path).await;
            self.record(&mut summary, document, &id);
            progress.inc(1);
        }

        progress.finish(format!("{} document(s) checked", paths.len()));
        summary
    }

    fn record(&self, summary: &mut RunSummary, document: Result<Document>, fallback_id: &str) {
        match document {
            Ok(document) => summary.documents.push(self.check_document(&document)),
            Err(e) => {
                warn!("Skipping document: {}", e);
                summary.failures.push(DocumentFailure::from_error(fallback_id, e));
            }
        }
    }
}
