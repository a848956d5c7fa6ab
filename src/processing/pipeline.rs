//! Screening pipeline: one resume + one JD in, a full report out
//!
//! A single screening is synchronous and self-contained; batch ranking
//! fans independent screenings out over a bounded worker pool. The only
//! state shared between invocations is the read-only vocabulary, the
//! extractor and the once-loaded embedding model.

use crate::config::Config;
use crate::processing::advisor::RecommendationGenerator;
use crate::processing::aggregator::{FinalScoreAggregator, FinalScoreResult, ScoreInputs, ScoreWeights};
use crate::processing::disambiguator::SkillDisambiguator;
use crate::processing::embeddings::EmbeddingEngine;
use crate::processing::extractor::SkillExtractor;
use crate::processing::highlighter::{ContextHighlighter, SkillContext};
use crate::processing::identity::IdentityResolver;
use crate::processing::matcher::{MatchResult, SkillMatcher};
use crate::processing::normalizer::TextNormalizer;
use crate::processing::profile::{Profile, ProfileBuilder};
use crate::processing::segmenter::SectionSegmenter;
use crate::processing::similarity::{SimilarityEngine, SimilarityScores};
use crate::vocab::Vocabulary;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Full outcome of screening one resume against one JD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub identity: String,
    pub profile: Profile,
    pub match_result: MatchResult,
    pub similarity: SimilarityScores,
    pub required_experience: u32,
    pub has_required_degree: bool,
    pub final_score: FinalScoreResult,
    pub recommendations: Vec<String>,
    pub skill_context: Option<SkillContext>,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

/// One resume entering a batch ranking, with a caller-chosen label
/// (typically the file name).
#[derive(Debug, Clone)]
pub struct RankInput {
    pub label: String,
    pub resume_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub label: String,
    pub identity: String,
    pub final_match_percent: f64,
    pub skill_match_percent: f64,
}

pub struct ScreeningPipeline {
    normalizer: TextNormalizer,
    segmenter: SectionSegmenter,
    extractor: Arc<SkillExtractor>,
    disambiguator: SkillDisambiguator,
    matcher: SkillMatcher,
    similarity: SimilarityEngine,
    aggregator: FinalScoreAggregator,
    advisor: RecommendationGenerator,
    identity: IdentityResolver,
    highlighter: ContextHighlighter,
}

impl ScreeningPipeline {
    /// Assemble the pipeline with explicit parts. `embedder` is `None`
    /// when no embedding model is available; semantic scores then degrade
    /// to 0.
    pub fn new(weights: ScoreWeights, embedder: Option<EmbeddingEngine>) -> Self {
        let vocab = Arc::new(Vocabulary::builtin());
        let extractor = Arc::new(SkillExtractor::new(vocab.clone()));

        Self {
            normalizer: TextNormalizer::new(),
            segmenter: SectionSegmenter::new(),
            extractor: extractor.clone(),
            disambiguator: SkillDisambiguator::new(vocab.clone()),
            matcher: SkillMatcher::new(extractor),
            similarity: SimilarityEngine::new(embedder),
            aggregator: FinalScoreAggregator::new(weights),
            advisor: RecommendationGenerator::new(vocab),
            identity: IdentityResolver::new(),
            highlighter: ContextHighlighter::new(),
        }
    }

    /// Build from configuration, loading the embedding model once. A
    /// missing model downgrades semantic similarity instead of failing
    /// startup.
    pub fn from_config(config: &Config) -> Self {
        let embedder = match EmbeddingEngine::from_config(config) {
            Ok(engine) => Some(engine),
            Err(e) => {
                warn!("Embedding model unavailable: {}", e);
                None
            }
        };

        Self::new(config.scoring.weights(), embedder)
    }

    pub fn has_embedder(&self) -> bool {
        self.similarity.has_embedder()
    }

    /// Screen one resume against one JD. Pure given the shared startup
    /// resources; empty inputs produce low scores, not errors.
    pub fn screen(
        &self,
        resume_text: &str,
        jd_text: &str,
        weights_override: Option<ScoreWeights>,
    ) -> ScreeningReport {
        let start_time = Instant::now();

        let identity = self.identity.resolve(resume_text);

        let clean_resume = self.normalizer.normalize(resume_text);
        let clean_jd = self.normalizer.normalize(jd_text);

        let sections = self.segmenter.segment(&clean_resume);
        let profile = ProfileBuilder::new(&self.extractor, &self.disambiguator)
            .build(&sections, &clean_resume);
        debug!(
            "profile: {} skills, {} years, {} degrees",
            profile.skills.len(),
            profile.experience_years,
            profile.education.len()
        );

        let match_result = self.matcher.match_skills(&profile.skills, &clean_jd);
        let similarity = self.similarity.compute(&clean_resume, &clean_jd);

        let required_experience = self.extractor.extract_experience_years(&clean_jd);
        let jd_degrees = self.extractor.extract_degrees(&clean_jd);
        let has_required_degree = if jd_degrees.is_empty() {
            !profile.education.is_empty()
        } else {
            !jd_degrees.is_disjoint(&profile.education)
        };

        let final_score = self.aggregator.compute(
            &ScoreInputs {
                skill_match_percent: match_result.skill_match_percent,
                semantic_similarity: similarity.semantic,
                experience_years: profile.experience_years,
                required_experience,
                has_required_degree,
                lexical_similarity: similarity.lexical,
            },
            weights_override,
        );

        let strengths = self
            .advisor
            .underemphasized_strengths(&clean_resume, &match_result.jd_skills);
        let recommendations = self.advisor.generate(&match_result, &strengths);

        let matched: Vec<String> = match_result.matched_skills.iter().cloned().collect();
        let skill_context = self.highlighter.find_context(&clean_resume, &matched);

        let elapsed = start_time.elapsed();
        info!(
            "screened '{}' in {:.2?}: {}%",
            identity, elapsed, final_score.final_match_percent
        );

        ScreeningReport {
            identity,
            profile,
            match_result,
            similarity,
            required_experience,
            has_required_degree,
            final_score,
            recommendations,
            skill_context,
            generated_at: Utc::now(),
            processing_time_ms: elapsed.as_millis() as u64,
        }
    }

    /// Rank a batch of resumes against one JD. Screenings run concurrently
    /// under a bounded worker pool; a failed item is logged and skipped
    /// and the batch continues. Results are ordered by final score
    /// descending with ranks 1..N; ties keep input order.
    pub async fn rank(
        self: Arc<Self>,
        batch: Vec<RankInput>,
        jd_text: &str,
        workers: usize,
    ) -> Vec<RankedCandidate> {
        let semaphore = Arc::new(Semaphore::new(workers.max(1)));
        let mut join_set = JoinSet::new();

        for (index, item) in batch.into_iter().enumerate() {
            let pipeline = Arc::clone(&self);
            let jd = jd_text.to_string();
            let semaphore = Arc::clone(&semaphore);

            join_set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("semaphore closed");
                let label = item.label.clone();
                let report = tokio::task::spawn_blocking(move || {
                    pipeline.screen(&item.resume_text, &jd, None)
                })
                .await;
                (index, label, report)
            });
        }

        let mut screened = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, label, Ok(report))) => screened.push((index, label, report)),
                Ok((_, label, Err(e))) => {
                    warn!("Skipping '{}': screening failed: {}", label, e);
                }
                Err(e) => {
                    warn!("Skipping batch item: task failed: {}", e);
                }
            }
        }

        screened.sort_by(|(idx_a, _, a), (idx_b, _, b)| {
            b.final_score
                .final_match_percent
                .partial_cmp(&a.final_score.final_match_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(idx_a.cmp(idx_b))
        });

        screened
            .into_iter()
            .enumerate()
            .map(|(position, (_, label, report))| RankedCandidate {
                rank: position + 1,
                label,
                identity: report.identity.clone(),
                final_match_percent: report.final_score.final_match_percent,
                skill_match_percent: report.match_result.skill_match_percent,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> ScreeningPipeline {
        ScreeningPipeline::new(ScoreWeights::default(), None)
    }

    const RESUME: &str = "John Smith\n\
        Software developer with 3 years experience building web backends.\n\
        Skills: Python, Django, SQL\n\
        Education: B.Tech in Computer Science";

    const JD: &str =
        "Looking for Python developer with 2 years experience and Docker skills. \
         Container deployment knowledge expected.";

    #[test]
    fn test_example_scenario() {
        let report = pipeline().screen(RESUME, JD, None);

        assert_eq!(report.identity, "John Smith");
        assert!(report.match_result.jd_skills.contains("python"));
        assert!(report.match_result.jd_skills.contains("docker"));
        assert!(report.match_result.matched_skills.contains("python"));
        assert!(report.match_result.missing_skills.contains("docker"));
        assert_eq!(report.match_result.skill_match_percent, 50.0);
        assert_eq!(report.required_experience, 2);
        assert!(report.recommendations.len() <= 5);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("Docker")));
    }

    #[test]
    fn test_empty_inputs_degrade_gracefully() {
        let report = pipeline().screen("", "", None);

        assert!(report.match_result.jd_skills.is_empty());
        assert_eq!(report.match_result.skill_match_percent, 0.0);
        assert_eq!(report.similarity.lexical, 0.0);
        assert_eq!(report.similarity.semantic, 0.0);
        assert_eq!(report.identity, "Candidate");
    }

    #[test]
    fn test_weighted_sum_invariant_holds_end_to_end() {
        let report = pipeline().screen(RESUME, JD, None);

        let reconstructed: f64 = report
            .final_score
            .breakdown
            .iter()
            .map(|(key, score)| score * report.final_score.weights_used[key])
            .sum();
        assert!((report.final_score.final_match_percent - reconstructed).abs() < 0.005);
    }

    #[test]
    fn test_override_weights_are_reported() {
        let weights = ScoreWeights {
            skills: 0.25,
            experience: 0.25,
            education: 0.25,
            keywords: 0.25,
        };
        let report = pipeline().screen(RESUME, JD, Some(weights));
        assert_eq!(report.final_score.weights_used["skills"], 0.25);
    }

    #[tokio::test]
    async fn test_rank_orders_by_score() {
        let pipeline = Arc::new(pipeline());
        let batch = vec![
            RankInput {
                label: "weak.txt".to_string(),
                resume_text: "Jane Doe\nSkills: HTML".to_string(),
            },
            RankInput {
                label: "strong.txt".to_string(),
                resume_text: RESUME.to_string(),
            },
        ];

        let ranking = pipeline.rank(batch, JD, 2).await;

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[0].label, "strong.txt");
        assert_eq!(ranking[1].rank, 2);
        assert!(ranking[0].final_match_percent >= ranking[1].final_match_percent);
    }

    #[tokio::test]
    async fn test_rank_ties_keep_input_order() {
        let pipeline = Arc::new(pipeline());
        let batch = vec![
            RankInput {
                label: "first.txt".to_string(),
                resume_text: "Skills: Python".to_string(),
            },
            RankInput {
                label: "second.txt".to_string(),
                resume_text: "Skills: Python".to_string(),
            },
        ];

        let ranking = pipeline.rank(batch, "Python developer wanted", 4).await;

        assert_eq!(ranking[0].label, "first.txt");
        assert_eq!(ranking[1].label, "second.txt");
    }

    #[tokio::test]
    async fn test_rank_empty_batch() {
        let pipeline = Arc::new(pipeline());
        let ranking = pipeline.rank(Vec::new(), JD, 4).await;
        assert!(ranking.is_empty());
    }
}
