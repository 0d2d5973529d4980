//! Report structure shared by every output format

use crate::processing::checker::{DocumentFailure, RunOutcome, RunSummary};
use crate::processing::matcher::MatchRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A finished run plus the metadata printed around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalReport {
    pub metadata: ReportMetadata,
    pub outcome: RunOutcome,
    pub statistics: ReportStatistics,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub title: String,

    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the finder used
    pub finder_version: String,

    /// Roster file, `-` for stdin
    pub roster_source: String,

    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub total_students: usize,
    pub unique_students: usize,
    pub total_approved: usize,
    pub documents_checked: usize,
    pub documents_skipped: usize,
    pub approved_per_document: Vec<DocumentCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCount {
    pub document_id: String,
    pub approved: usize,
}

impl ApprovalReport {
    pub fn from_summary(
        summary: RunSummary,
        title: impl Into<String>,
        roster_source: impl Into<String>,
        processing_time_ms: u64,
    ) -> Self {
        let statistics = ReportStatistics::from_summary(&summary);

        Self {
            metadata: ReportMetadata {
                title: title.into(),
                generated_at: Utc::now(),
                finder_version: env!("CARGO_PKG_VERSION").to_string(),
                roster_source: roster_source.into(),
                processing_time_ms,
            },
            outcome: summary.outcome(),
            statistics,
            summary,
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &MatchRecord> {
        self.summary.records()
    }

    pub fn failures(&self) -> &[DocumentFailure] {
        self.summary.failures()
    }

    /// Report lines in export order: `<rank>. <name> - <document>`.
    pub fn listing_lines(&self) -> Vec<String> {
        self.records()
            .map(|r| format!("{}. {} - {}", r.rank, r.name, r.document_id))
            .collect()
    }
}

impl ReportStatistics {
    pub fn from_summary(summary: &RunSummary) -> Self {
        Self {
            total_students: summary.roster_size(),
            unique_students: summary.unique_roster_size,
            total_approved: summary.total_matches(),
            documents_checked: summary.documents.len(),
            documents_skipped: summary.failures().len(),
            approved_per_document: summary
                .per_document_counts()
                .into_iter()
                .map(|(document_id, approved)| DocumentCount {
                    document_id: document_id.to_string(),
                    approved,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::checker::ApprovalChecker;
    use crate::processing::document::Document;
    use crate::processing::progress::NullProgress;
    use crate::processing::roster::Roster;

    fn sample_report() -> ApprovalReport {
        let checker = ApprovalChecker::new(Roster::parse("Maria Silva\nAna Lima\nBruno Alves"));
        let summary = checker.run(
            vec![
                Ok(Document::from_text("turma_a.pdf", "MARIA SILVA\nANA LIMA")),
                Ok(Document::from_text("turma_b.pdf", "CARLOS DIAS")),
            ],
            &NullProgress,
        );
        ApprovalReport::from_summary(summary, "Approved Students Report", "roster.txt", 5)
    }

    #[test]
    fn test_statistics_from_summary() {
        let report = sample_report();

        assert_eq!(report.outcome, RunOutcome::Matches);
        assert_eq!(report.statistics.total_students, 3);
        assert_eq!(report.statistics.total_approved, 2);
        assert_eq!(report.statistics.documents_checked, 2);
        assert_eq!(
            report.statistics.approved_per_document,
            vec![
                DocumentCount { document_id: "turma_a.pdf".into(), approved: 2 },
                DocumentCount { document_id: "turma_b.pdf".into(), approved: 0 },
            ]
        );
    }

    #[test]
    fn test_listing_lines() {
        let report = sample_report();

        assert_eq!(
            report.listing_lines(),
            vec!["1. ana lima - turma_a.pdf", "2. maria silva - turma_a.pdf"]
        );
    }
}
