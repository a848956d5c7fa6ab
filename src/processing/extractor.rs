//! Skill and entity extraction
//!
//! Skills are matched against the static vocabulary through one of two
//! interchangeable strategies picked once at startup: an automaton-based
//! phrase matcher with word-boundary checks, or a plain substring matcher
//! used when the automaton cannot be built. Matches are canonicalized
//! through the synonym table either way.

use crate::vocab::Vocabulary;
use aho_corasick::AhoCorasick;
use log::warn;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// One of exactly two matching strategies over the skill vocabulary.
pub trait MatchStrategy: Send + Sync {
    /// Raw vocabulary patterns found in the given lowercase text.
    fn find_patterns(&self, text: &str) -> Vec<String>;

    fn name(&self) -> &'static str;
}

/// Phrase matcher: case-insensitive leftmost-longest automaton matching
/// with word-boundary checks, so "react" never matches inside "reacted".
pub struct PhraseStrategy {
    automaton: AhoCorasick,
    patterns: Vec<String>,
}

impl PhraseStrategy {
    pub fn build(patterns: Vec<String>) -> anyhow::Result<Self> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&patterns)?;

        Ok(Self {
            automaton,
            patterns,
        })
    }

    fn is_boundary(text: &str, start: usize, end: usize) -> bool {
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    }
}

impl MatchStrategy for PhraseStrategy {
    fn find_patterns(&self, text: &str) -> Vec<String> {
        self.automaton
            .find_iter(text)
            .filter(|mat| Self::is_boundary(text, mat.start(), mat.end()))
            .map(|mat| self.patterns[mat.pattern().as_usize()].clone())
            .collect()
    }

    fn name(&self) -> &'static str {
        "phrase"
    }
}

/// Fallback matcher: literal case-insensitive containment per entry.
/// Coarser than the phrase matcher; a pattern may match inside a longer
/// word.
pub struct SubstringStrategy {
    patterns: Vec<String>,
}

impl SubstringStrategy {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }
}

impl MatchStrategy for SubstringStrategy {
    fn find_patterns(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|pattern| text.contains(pattern.as_str()))
            .cloned()
            .collect()
    }

    fn name(&self) -> &'static str {
        "substring"
    }
}

/// Extracts skills, experience years, degrees and job titles from
/// normalized text.
pub struct SkillExtractor {
    vocab: Arc<Vocabulary>,
    strategy: Box<dyn MatchStrategy>,
    years_re: Regex,
    title_re: Regex,
}

impl SkillExtractor {
    /// Build the extractor, preferring the phrase strategy and falling back
    /// to substring containment if the automaton cannot be constructed.
    /// The choice happens once here, never per call.
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        let patterns = vocab.matchable_skills();
        let strategy: Box<dyn MatchStrategy> = match PhraseStrategy::build(patterns.clone()) {
            Ok(phrase) => Box::new(phrase),
            Err(e) => {
                warn!("Phrase matcher unavailable ({}), using substring fallback", e);
                Box::new(SubstringStrategy::new(patterns))
            }
        };

        Self::with_strategy(vocab, strategy)
    }

    pub fn with_strategy(vocab: Arc<Vocabulary>, strategy: Box<dyn MatchStrategy>) -> Self {
        let years_re = Regex::new(r"(\d+)\+?\s+years?").expect("Invalid years regex");
        let title_re =
            Regex::new(r"(worked as|role:|position:)\s+([a-z\s]+)").expect("Invalid title regex");

        Self {
            vocab,
            strategy,
            years_re,
            title_re,
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Canonical skill names found in the text, duplicates collapsed.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        self.strategy
            .find_patterns(&lowered)
            .iter()
            .map(|pattern| self.vocab.canonical(pattern).to_string())
            .collect()
    }

    /// Maximum number of years mentioned as "<n> years", or 0.
    pub fn extract_experience_years(&self, text: &str) -> u32 {
        let lowered = text.to_lowercase();
        self.years_re
            .captures_iter(&lowered)
            .filter_map(|cap| cap[1].parse::<u32>().ok())
            .max()
            .unwrap_or(0)
    }

    /// Degree codes whose indicator tokens appear in the text.
    pub fn extract_degrees(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        self.vocab
            .degrees()
            .iter()
            .filter(|(_, tokens)| tokens.iter().any(|t| lowered.contains(t.as_str())))
            .map(|(code, _)| code.clone())
            .collect()
    }

    /// Job titles from the title vocabulary, plus phrases captured after
    /// markers like "worked as", truncated to three words.
    pub fn extract_job_titles(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        let mut found: BTreeSet<String> = self
            .vocab
            .job_titles()
            .iter()
            .filter(|title| lowered.contains(title.as_str()))
            .cloned()
            .collect();

        for cap in self.title_re.captures_iter(&lowered) {
            let role = cap[2]
                .split_whitespace()
                .take(3)
                .collect::<Vec<_>>()
                .join(" ");
            if !role.is_empty() {
                found.insert(role);
            }
        }

        found
    }
}
