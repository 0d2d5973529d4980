//! Document structures

use serde::{Deserialize, Serialize};

/// A result sheet whose text has already been extracted.
///
/// Pages are kept separately; a page with no text is an empty string and
/// contributes nothing to name extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub pages: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            id: id.into(),
            pages,
        }
    }

    /// Build a single-page document from a text buffer.
    pub fn from_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, vec![text.into()])
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn full_text(&self) -> String {
        join_pages(&self.pages)
    }
}

/// Pages joined by newlines, skipping the ones without text.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        let page = page.as_ref();
        if page.trim().is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(page);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_joins_pages() {
        let doc = Document::new(
            "sheet.pdf",
            vec!["MARIA SILVA".to_string(), "CARLOS DIAS".to_string()],
        );

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.full_text(), "MARIA SILVA\nCARLOS DIAS");
    }

    #[test]
    fn test_full_text_skips_empty_pages() {
        let doc = Document::new(
            "scanned.pdf",
            vec![String::new(), "ANA LIMA".to_string(), "  ".to_string()],
        );

        assert_eq!(doc.full_text(), "ANA LIMA");
    }
}
