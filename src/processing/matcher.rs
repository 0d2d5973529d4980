//! Roster matching against the names extracted from one document

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One roster name found approved in a given document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub rank: usize,
    pub name: String,
    pub document_id: String,
}

/// Intersect the roster with a document's extracted names.
///
/// Matches are sorted by normalized name and ranked from 1, so the same
/// inputs always produce the same records.
pub fn match_roster(
    roster: &HashSet<String>,
    extracted: &HashSet<String>,
    document_id: &str,
) -> Vec<MatchRecord> {
    let mut common: Vec<&String> = roster.intersection(extracted).collect();
    common.sort();

    common
        .into_iter()
        .enumerate()
        .map(|(idx, name)| MatchRecord {
            rank: idx + 1,
            name: name.clone(),
            document_id: document_id.to_string(),
        })
        .collect()
}
