//! Student roster parsed from user-supplied text

use crate::processing::normalizer::normalize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    entries: Vec<String>,
    names: HashSet<String>,
}

impl Roster {
    /// One name per line. Blank lines and lines that normalize to nothing
    /// are skipped; duplicates are kept in `entries` but collapse in the
    /// matching set.
    pub fn parse(text: &str) -> Self {
        let entries: Vec<String> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(normalize)
            .filter(|name| !name.is_empty())
            .collect();

        Self::from_entries(entries)
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .map(|name| normalize(name.as_ref()))
            .filter(|name| !name.is_empty())
            .collect();

        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<String>) -> Self {
        let names = entries.iter().cloned().collect();
        Self { entries, names }
    }

    /// Number of roster lines, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn unique_len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn names(&self) -> &HashSet<String> {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize(name))
    }
}
