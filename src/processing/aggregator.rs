//! Weighted aggregation of scoring signals

use crate::error::{Result, ScreenerError};
use crate::processing::round2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const SKILLS_KEY: &str = "skills";
pub const EXPERIENCE_KEY: &str = "experience";
pub const EDUCATION_KEY: &str = "education";
pub const KEYWORDS_KEY: &str = "keywords";

/// Component weights. Values are applied as-is; keeping them summing to
/// 1.0 is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub keywords: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            education: 0.1,
            keywords: 0.1,
        }
    }
}

impl ScoreWeights {
    /// Parse a caller-supplied weight map. All four component keys must be
    /// present; unknown keys are ignored with a warning.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self> {
        let get = |key: &str| {
            map.get(key).copied().ok_or_else(|| {
                ScreenerError::MalformedWeights(format!("missing required key '{}'", key))
            })
        };

        let weights = Self {
            skills: get(SKILLS_KEY)?,
            experience: get(EXPERIENCE_KEY)?,
            education: get(EDUCATION_KEY)?,
            keywords: get(KEYWORDS_KEY)?,
        };

        for key in map.keys() {
            if ![SKILLS_KEY, EXPERIENCE_KEY, EDUCATION_KEY, KEYWORDS_KEY]
                .contains(&key.as_str())
            {
                log::warn!("Ignoring unknown weight key '{}'", key);
            }
        }

        Ok(weights)
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            (SKILLS_KEY.to_string(), self.skills),
            (EXPERIENCE_KEY.to_string(), self.experience),
            (EDUCATION_KEY.to_string(), self.education),
            (KEYWORDS_KEY.to_string(), self.keywords),
        ])
    }
}

/// Signals entering the final score.
///
/// `semantic_similarity` is carried through for reporting; the weighted
/// sum itself uses the skill, experience, education and keyword components
/// only.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs {
    pub skill_match_percent: f64,
    pub semantic_similarity: f64,
    pub experience_years: u32,
    pub required_experience: u32,
    pub has_required_degree: bool,
    pub lexical_similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalScoreResult {
    pub final_match_percent: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub weights_used: BTreeMap<String, f64>,
}

pub struct FinalScoreAggregator {
    default_weights: ScoreWeights,
}

impl FinalScoreAggregator {
    pub fn new(default_weights: ScoreWeights) -> Self {
        Self { default_weights }
    }

    /// Combine the component scores into one weighted percentage.
    ///
    /// Experience saturates at 100 once the requirement is met and is a
    /// neutral 50 when the JD names no requirement; education is 100 with
    /// the required degree, 50 without.
    pub fn compute(
        &self,
        inputs: &ScoreInputs,
        weights_override: Option<ScoreWeights>,
    ) -> FinalScoreResult {
        let weights = weights_override.unwrap_or(self.default_weights);

        let skill_score = round2(inputs.skill_match_percent);

        let experience_score = if inputs.required_experience > 0 {
            let ratio =
                (inputs.experience_years as f64 / inputs.required_experience as f64).min(1.0);
            round2(ratio * 100.0)
        } else {
            50.0
        };

        let education_score = if inputs.has_required_degree { 100.0 } else { 50.0 };

        let keyword_score = round2(inputs.lexical_similarity);

        let final_score = skill_score * weights.skills
            + experience_score * weights.experience
            + education_score * weights.education
            + keyword_score * weights.keywords;

        FinalScoreResult {
            final_match_percent: round2(final_score),
            breakdown: BTreeMap::from([
                (SKILLS_KEY.to_string(), skill_score),
                (EXPERIENCE_KEY.to_string(), experience_score),
                (EDUCATION_KEY.to_string(), education_score),
                (KEYWORDS_KEY.to_string(), keyword_score),
            ]),
            weights_used: weights.to_map(),
        }
    }
}

impl Default for FinalScoreAggregator {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ScoreInputs {
        ScoreInputs {
            skill_match_percent: 50.0,
            semantic_similarity: 62.5,
            experience_years: 3,
            required_experience: 2,
            has_required_degree: true,
            lexical_similarity: 40.0,
        }
    }

    #[test]
    fn test_default_weighted_sum() {
        let result = FinalScoreAggregator::default().compute(&inputs(), None);

        // skills 50*0.5 + experience 100*0.3 + education 100*0.1 + keywords 40*0.1
        assert_eq!(result.final_match_percent, 69.0);
        assert_eq!(result.breakdown["skills"], 50.0);
        assert_eq!(result.breakdown["experience"], 100.0);
        assert_eq!(result.breakdown["education"], 100.0);
        assert_eq!(result.breakdown["keywords"], 40.0);
    }

    #[test]
    fn test_final_equals_weighted_breakdown() {
        let result = FinalScoreAggregator::default().compute(&inputs(), None);

        let reconstructed: f64 = result
            .breakdown
            .iter()
            .map(|(key, score)| score * result.weights_used[key])
            .sum();
        assert!((result.final_match_percent - reconstructed).abs() < 0.005);
    }

    #[test]
    fn test_experience_saturates_at_requirement() {
        let aggregator = FinalScoreAggregator::default();

        let mut scenario = inputs();
        scenario.experience_years = 2;
        scenario.required_experience = 2;
        let exact = aggregator.compute(&scenario, None);

        scenario.experience_years = 10;
        let over = aggregator.compute(&scenario, None);

        assert_eq!(exact.breakdown["experience"], 100.0);
        assert_eq!(over.breakdown["experience"], 100.0);
    }

    #[test]
    fn test_no_requirement_is_neutral_50() {
        let aggregator = FinalScoreAggregator::default();

        let mut scenario = inputs();
        scenario.required_experience = 0;

        scenario.experience_years = 0;
        let none = aggregator.compute(&scenario, None);
        scenario.experience_years = 10;
        let many = aggregator.compute(&scenario, None);

        assert_eq!(none.breakdown["experience"], 50.0);
        assert_eq!(many.breakdown["experience"], 50.0);
    }

    #[test]
    fn test_partial_experience_ratio() {
        let mut scenario = inputs();
        scenario.experience_years = 1;
        scenario.required_experience = 3;
        let result = FinalScoreAggregator::default().compute(&scenario, None);
        assert_eq!(result.breakdown["experience"], 33.33);
    }

    #[test]
    fn test_missing_degree_scores_50() {
        let mut scenario = inputs();
        scenario.has_required_degree = false;
        let result = FinalScoreAggregator::default().compute(&scenario, None);
        assert_eq!(result.breakdown["education"], 50.0);
    }

    #[test]
    fn test_override_weights_used_as_is() {
        let weights = ScoreWeights {
            skills: 1.0,
            experience: 0.0,
            education: 0.0,
            keywords: 0.0,
        };
        let result = FinalScoreAggregator::default().compute(&inputs(), Some(weights));
        assert_eq!(result.final_match_percent, 50.0);
        assert_eq!(result.weights_used["skills"], 1.0);
    }

    #[test]
    fn test_from_map_requires_all_keys() {
        let mut map = HashMap::new();
        map.insert("skills".to_string(), 0.7);
        map.insert("experience".to_string(), 0.3);

        let err = ScoreWeights::from_map(&map).unwrap_err();
        assert!(matches!(err, ScreenerError::MalformedWeights(_)));
    }

    #[test]
    fn test_from_map_accepts_full_set() {
        let map: HashMap<String, f64> = [
            ("skills", 0.4),
            ("experience", 0.4),
            ("education", 0.1),
            ("keywords", 0.1),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();

        let weights = ScoreWeights::from_map(&map).unwrap();
        assert_eq!(weights.skills, 0.4);
        assert_eq!(weights.experience, 0.4);
    }
}
