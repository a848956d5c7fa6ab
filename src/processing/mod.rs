//! Matching and scoring pipeline

pub mod advisor;
pub mod aggregator;
pub mod disambiguator;
pub mod embeddings;
pub mod extractor;
pub mod highlighter;
pub mod identity;
pub mod matcher;
pub mod normalizer;
pub mod pipeline;
pub mod profile;
pub mod segmenter;
pub mod similarity;

/// Round a percentage score to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
