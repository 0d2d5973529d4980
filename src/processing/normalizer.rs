//! Name normalization for accent and case insensitive comparison

use unicode_normalization::UnicodeNormalization;

/// Fold a raw string into its comparable form.
///
/// The text is decomposed (NFKD) so diacritics become separate combining
/// marks, every non-ASCII character is dropped, and the rest is lowercased
/// and trimmed. Characters with no ASCII fallback simply disappear.
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| c.is_ascii())
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}
