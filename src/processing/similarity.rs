//! Lexical and semantic similarity between two free texts
//!
//! Lexical similarity builds a TF-IDF space per call from exactly the two
//! texts being compared, so scores are not comparable across different
//! pairs; that is a property of the design, not a defect. Semantic
//! similarity goes through the shared embedding model when one is loaded.

use crate::processing::embeddings::EmbeddingEngine;
use crate::processing::round2;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Independent lexical and semantic scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScores {
    pub lexical: f64,
    pub semantic: f64,
}

pub struct SimilarityEngine {
    stopwords: HashSet<&'static str>,
    embedder: Option<EmbeddingEngine>,
}

impl SimilarityEngine {
    /// Build the engine; `embedder` is the once-loaded shared model, or
    /// `None` when no model is available, in which case semantic scores
    /// degrade to 0.0.
    pub fn new(embedder: Option<EmbeddingEngine>) -> Self {
        if embedder.is_none() {
            warn!("No embedding model loaded; semantic similarity will report 0");
        }

        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            embedder,
        }
    }

    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    pub fn compute(&self, text1: &str, text2: &str) -> SimilarityScores {
        SimilarityScores {
            lexical: self.lexical_similarity(text1, text2),
            semantic: self.semantic_similarity(text1, text2),
        }
    }

    /// TF-IDF cosine similarity over a vocabulary built from the two input
    /// texts alone, scaled to a percentage and rounded to 2 decimals.
    pub fn lexical_similarity(&self, text1: &str, text2: &str) -> f64 {
        let tokens1 = self.tokenize(text1);
        let tokens2 = self.tokenize(text2);

        if tokens1.is_empty() || tokens2.is_empty() {
            return 0.0;
        }

        let counts1 = term_counts(&tokens1);
        let counts2 = term_counts(&tokens2);

        let mut vocabulary: Vec<&String> = counts1.keys().chain(counts2.keys()).collect();
        vocabulary.sort();
        vocabulary.dedup();

        let mut dot = 0.0;
        let mut norm1 = 0.0;
        let mut norm2 = 0.0;

        for term in &vocabulary {
            // Smoothed idf over the two-document corpus.
            let df = counts1.contains_key(*term) as u32 + counts2.contains_key(*term) as u32;
            let weight = ((1.0 + 2.0) / (1.0 + df as f64)).ln() + 1.0;
            let w1 = counts1.get(*term).copied().unwrap_or(0) as f64 * weight;
            let w2 = counts2.get(*term).copied().unwrap_or(0) as f64 * weight;
            dot += w1 * w2;
            norm1 += w1 * w1;
            norm2 += w2 * w2;
        }

        if norm1 == 0.0 || norm2 == 0.0 {
            return 0.0;
        }

        let cosine = dot / (norm1.sqrt() * norm2.sqrt());
        round2(cosine * 100.0)
    }

    /// Embedding cosine similarity scaled to a percentage, rounded to 2
    /// decimals; 0.0 when no model is loaded or either text embeds to a
    /// zero vector.
    pub fn semantic_similarity(&self, text1: &str, text2: &str) -> f64 {
        let Some(embedder) = &self.embedder else {
            return 0.0;
        };

        let emb1 = embedder.encode_single(text1);
        let emb2 = embedder.encode_single(text2);

        match EmbeddingEngine::cosine_similarity(&emb1, &emb2) {
            Ok(score) => round2((score.max(0.0) as f64) * 100.0),
            Err(e) => {
                warn!("Semantic similarity failed: {}", e);
                0.0
            }
        }
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|w| w.to_lowercase())
            .filter(|w| w.len() > 1 && !self.stopwords.contains(w.as_str()))
            .collect()
    }
}

fn term_counts(tokens: &[String]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

/// Common English stopwords excluded from the lexical vocabulary.
const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can",
    "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "if",
    "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor", "not",
    "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over",
    "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "you", "your", "yours",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SimilarityEngine {
        SimilarityEngine::new(None)
    }

    #[test]
    fn test_identical_texts_score_100() {
        let score = engine().lexical_similarity(
            "python developer with django experience",
            "python developer with django experience",
        );
        assert!((score - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_disjoint_texts_score_0() {
        let score = engine().lexical_similarity("apples oranges bananas", "kernel scheduler mutex");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between() {
        let score = engine().lexical_similarity(
            "python sql developer",
            "python haskell researcher",
        );
        assert!(score > 0.0 && score < 100.0);
    }

    #[test]
    fn test_empty_inputs_do_not_panic() {
        let engine = engine();
        assert_eq!(engine.lexical_similarity("", ""), 0.0);
        assert_eq!(engine.lexical_similarity("python", ""), 0.0);
        assert_eq!(engine.semantic_similarity("", ""), 0.0);
    }

    #[test]
    fn test_stopword_only_text_scores_0() {
        let score = engine().lexical_similarity("the and of to", "the and of to");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_semantic_without_model_is_0() {
        let engine = engine();
        assert!(!engine.has_embedder());
        assert_eq!(engine.semantic_similarity("python", "python"), 0.0);
    }

    #[test]
    fn test_scores_are_rounded_to_2_decimals() {
        let score = engine().lexical_similarity(
            "python sql developer team",
            "python rust developer",
        );
        assert!((score * 100.0 - (score * 100.0).round()).abs() < 1e-9);
    }
}
