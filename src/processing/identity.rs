//! Best-effort candidate identity extraction
//!
//! Works on raw, pre-normalization text: a name line near the top, else an
//! email, else a phone number, else a fixed placeholder. Always returns a
//! label.

use regex::Regex;

const FALLBACK_LABEL: &str = "Candidate";
const BOILERPLATE_WORDS: &[&str] = &["resume", "cv", "profile"];

pub struct IdentityResolver {
    name_re: Regex,
    email_re: Regex,
    phone_re: Regex,
}

impl IdentityResolver {
    pub fn new() -> Self {
        let name_re = Regex::new(r"^[A-Za-z\s]{3,40}$").expect("Invalid name regex");
        let email_re = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");
        let phone_re =
            Regex::new(r"(\+?\d{1,3}[-.\s]?)?\d{10}").expect("Invalid phone regex");

        Self {
            name_re,
            email_re,
            phone_re,
        }
    }

    /// Resolve a display label for the candidate. Each tier runs only when
    /// the previous one found nothing; the final fallback makes the
    /// function total.
    pub fn resolve(&self, raw_text: &str) -> String {
        let lines: Vec<&str> = raw_text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        // Tier 1: a name-shaped line near the top.
        for line in lines.iter().take(5) {
            if self.name_re.is_match(line) {
                let lowered = line.to_lowercase();
                if !BOILERPLATE_WORDS.iter().any(|w| lowered.contains(w)) {
                    return title_case(line);
                }
            }
        }

        // Tier 2: first email anywhere.
        if let Some(mat) = self.email_re.find(raw_text) {
            return mat.as_str().to_string();
        }

        // Tier 3: first phone number anywhere.
        if let Some(mat) = self.phone_re.find(raw_text) {
            return mat.as_str().to_string();
        }

        FALLBACK_LABEL.to_string()
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_top_lines() {
        let resolver = IdentityResolver::new();
        let text = "john smith\nSoftware Engineer, Acme Inc.\njohn@example.com";
        assert_eq!(resolver.resolve(text), "John Smith");
    }

    #[test]
    fn test_boilerplate_lines_are_skipped() {
        let resolver = IdentityResolver::new();
        let text = "Resume\nJane Doe\njane@example.com";
        assert_eq!(resolver.resolve(text), "Jane Doe");
    }

    #[test]
    fn test_email_fallback() {
        let resolver = IdentityResolver::new();
        // No name-shaped line: digits and punctuation everywhere.
        let text = "123 Engineer (2020)\ncontact: jane.doe@example.com, +1 555";
        assert_eq!(resolver.resolve(text), "jane.doe@example.com");
    }

    #[test]
    fn test_phone_fallback() {
        let resolver = IdentityResolver::new();
        let text = "### 2020-2024 ###\ncall +91 9876543210 anytime";
        assert_eq!(resolver.resolve(text), "+91 9876543210");
    }

    #[test]
    fn test_placeholder_for_empty_input() {
        let resolver = IdentityResolver::new();
        assert_eq!(resolver.resolve(""), "Candidate");
        assert_eq!(resolver.resolve("!!! ???"), "Candidate");
    }

    #[test]
    fn test_long_line_is_not_a_name() {
        let resolver = IdentityResolver::new();
        let text = "this line has far too many characters to plausibly be a name at all\n9876543210";
        assert_eq!(resolver.resolve(text), "9876543210");
    }
}
