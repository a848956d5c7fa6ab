//! Ambiguous-skill filtering
//!
//! Some vocabulary terms ("spring", "react", "docker") also occur in
//! everyday language. A registered skill survives only when one of its
//! tech-context words appears somewhere in the full document; the check is
//! deliberately document-wide, not a window around the ambiguous term.

use crate::vocab::Vocabulary;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct SkillDisambiguator {
    vocab: Arc<Vocabulary>,
}

impl SkillDisambiguator {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    /// Filter a candidate skill set against the surrounding text. Skills
    /// without a disambiguation rule pass through unchanged; this never
    /// adds skills.
    pub fn filter(&self, skills: &BTreeSet<String>, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();

        skills
            .iter()
            .filter(|skill| match self.vocab.disambiguation_context(skill) {
                None => true,
                Some(context) => context.iter().any(|word| lowered.contains(word.as_str())),
            })
            .cloned()
            .collect()
    }
}
