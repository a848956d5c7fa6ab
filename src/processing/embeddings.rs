//! Dense sentence embeddings via Model2Vec
//!
//! The model is loaded once at startup and shared read-only afterwards;
//! concurrent batch screenings all encode through the same instance.

use crate::config::Config;
use crate::error::{Result, ScreenerError};
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

pub struct EmbeddingEngine {
    model: StaticModel,
    model_name: String,
}

impl EmbeddingEngine {
    pub fn new(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| ScreenerError::Embedding(format!("Failed to load model: {}", e)))?;

        info!(
            "Embedding model {} loaded in {:.2?}",
            model_name,
            start_time.elapsed()
        );

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.model_path(), &config.models.embedding_model)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn encode_single(&self, text: &str) -> Vec<f32> {
        self.model.encode_single(text)
    }

    pub fn encode(&self, texts: &[String]) -> Vec<Vec<f32>> {
        self.model.encode(texts)
    }

    /// Cosine similarity between two embeddings, 0.0 when either norm is
    /// zero (e.g. empty text).
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
        if a.len() != b.len() {
            return Err(ScreenerError::Embedding(format!(
                "Embedding dimensions don't match: {} vs {}",
                a.len(),
                b.len()
            )));
        }

        if a.is_empty() {
            return Ok(0.0);
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            Ok(0.0)
        } else {
            Ok(dot_product / (norm_a * norm_b))
        }
    }
}
