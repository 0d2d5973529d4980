//! Candidate name extraction from result sheet text

use crate::processing::document::{join_pages, Document};
use crate::processing::normalizer::normalize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// ALL-CAPS full names: a word of two or more uppercase letters (accented
/// letters À-Ú included), a space, then more uppercase letters or spaces.
const NAME_PATTERN: &str = r"\b[A-ZÀ-Ú][A-ZÀ-Ú]+ [A-ZÀ-Ú ]+\b";

/// Optional word-count bounds applied to normalized matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFilter {
    pub min_words: Option<usize>,
    pub max_words: Option<usize>,
}

impl NameFilter {
    pub fn new(min_words: Option<usize>, max_words: Option<usize>) -> Self {
        Self { min_words, max_words }
    }

    pub fn accepts(&self, name: &str) -> bool {
        let words = name.split_whitespace().count();
        self.min_words.map_or(true, |min| words >= min)
            && self.max_words.map_or(true, |max| words <= max)
    }
}

pub struct NameExtractor {
    name_regex: Regex,
    filter: NameFilter,
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NameExtractor {
    pub fn new() -> Self {
        let name_regex = Regex::new(NAME_PATTERN).expect("Invalid name regex");

        Self {
            name_regex,
            filter: NameFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: NameFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Distinct normalized forms of every name-like match in `text`.
    pub fn extract_from_text(&self, text: &str) -> HashSet<String> {
        self.name_regex
            .find_iter(text)
            .map(|m| normalize(m.as_str()))
            .filter(|name| !name.is_empty() && self.filter.accepts(name))
            .collect()
    }

    /// Pages are joined with a newline before scanning.
    pub fn extract_from_pages<I, S>(&self, pages: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extract_from_text(&join_pages(pages))
    }

    pub fn extract(&self, document: &Document) -> HashSet<String> {
        self.extract_from_text(&document.full_text())
    }
}

fn default_extractor() -> &'static NameExtractor {
    static EXTRACTOR: OnceLock<NameExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(NameExtractor::new)
}

pub fn extract_names_from_text(text: &str) -> HashSet<String> {
    default_extractor().extract_from_text(text)
}

pub fn extract_names_from_pages<I, S>(pages: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    default_extractor().extract_from_pages(pages)
}

/// Names found in a loaded document, without any word-count filter.
pub fn extract_names(document: &Document) -> HashSet<String> {
    default_extractor().extract(document)
}
