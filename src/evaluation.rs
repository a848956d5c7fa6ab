//! Evaluation harness: compare model scores against human labels
//!
//! Reads a CSV of (resume_file, jd_file, human_score) rows, runs the full
//! pipeline per row and reports the Spearman rank correlation between
//! human and model scores. Rows that fail to process are logged and
//! skipped; the evaluation continues with partial results.

use crate::error::{Result, ScreenerError};
use crate::input::InputManager;
use crate::processing::pipeline::ScreeningPipeline;
use log::warn;
use serde::Deserialize;
use std::cmp::Ordering;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct LabeledPair {
    pub resume_file: String,
    pub jd_file: String,
    pub human_score: f64,
}

#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub human_scores: Vec<f64>,
    pub model_scores: Vec<f64>,
    pub skipped: usize,
    pub spearman: Option<f64>,
}

/// Read the labels CSV. Expected headers: resume_file, jd_file,
/// human_score.
pub fn read_labels(path: &Path) -> Result<Vec<LabeledPair>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| ScreenerError::Evaluation(format!("Failed to open labels file: {}", e)))?;

    let mut labels = Vec::new();
    for row in reader.deserialize() {
        let pair: LabeledPair =
            row.map_err(|e| ScreenerError::Evaluation(format!("Bad labels row: {}", e)))?;
        labels.push(pair);
    }

    Ok(labels)
}

/// Run the pipeline over every labeled pair. Resume files are looked up
/// under `<data_dir>/resumes`, JD files under `<data_dir>/jds`.
pub async fn run(
    pipeline: &ScreeningPipeline,
    labels: &[LabeledPair],
    data_dir: &Path,
) -> EvaluationOutcome {
    let mut manager = InputManager::new();
    let mut human_scores = Vec::new();
    let mut model_scores = Vec::new();
    let mut skipped = 0;

    for pair in labels {
        let resume_path = data_dir.join("resumes").join(&pair.resume_file);
        let jd_path = data_dir.join("jds").join(&pair.jd_file);

        let resume_text = match manager.extract_text(&resume_path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {}: {}", pair.resume_file, e);
                skipped += 1;
                continue;
            }
        };
        let jd_text = match manager.extract_text(&jd_path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {}: {}", pair.jd_file, e);
                skipped += 1;
                continue;
            }
        };

        let report = pipeline.screen(&resume_text, &jd_text, None);
        human_scores.push(pair.human_score);
        model_scores.push(report.final_score.final_match_percent);
    }

    let spearman = spearman(&human_scores, &model_scores);

    EvaluationOutcome {
        human_scores,
        model_scores,
        skipped,
        spearman,
    }
}

/// Spearman rank correlation with average ranks for ties. `None` when the
/// series are too short or either side has zero variance.
pub fn spearman(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }

    pearson(&average_ranks(a), &average_ranks(b))
}

fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        // 1-based rank, averaged over the tie group.
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for k in start..=end {
            ranks[order[k]] = rank;
        }
        start = end + 1;
    }

    ranks
}

fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        covariance += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a).powi(2);
        var_b += (y - mean_b).powi(2);
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }

    Some(covariance / (var_a.sqrt() * var_b.sqrt()))
}
