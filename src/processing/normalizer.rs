//! Text normalization
//!
//! Canonicalizes raw text before segmentation and matching: lowercase,
//! restricted character set, collapsed whitespace. Idempotent, so cleaned
//! text can safely be cleaned again.

use regex::Regex;

pub struct TextNormalizer {
    disallowed: Regex,
    whitespace: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        // Keep letters, digits, whitespace and . , - +
        let disallowed = Regex::new(r"[^a-z0-9\s\.\,\-\+]").expect("Invalid character regex");
        let whitespace = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            disallowed,
            whitespace,
        }
    }

    /// Lowercase, replace disallowed characters with a space, collapse
    /// whitespace runs and trim. Empty input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        let stripped = self.disallowed.replace_all(&lowered, " ");
        self.whitespace
            .replace_all(&stripped, " ")
            .trim()
            .to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
