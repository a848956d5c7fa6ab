//! Skill matching between a candidate profile and a job description

use crate::processing::extractor::SkillExtractor;
use crate::processing::round2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Outcome of matching candidate skills against JD skills.
///
/// `matched_skills` and `missing_skills` partition `jd_skills`:
/// their union is the JD set and they never overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub skill_match_percent: f64,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub jd_skills: BTreeSet<String>,
}

pub struct SkillMatcher {
    extractor: Arc<SkillExtractor>,
}

impl SkillMatcher {
    pub fn new(extractor: Arc<SkillExtractor>) -> Self {
        Self { extractor }
    }

    /// Extract JD skills with the shared extractor and compare against the
    /// candidate set. An empty JD skill set scores 0, not an error.
    pub fn match_skills(&self, candidate_skills: &BTreeSet<String>, jd_text: &str) -> MatchResult {
        let jd_skills = self.extractor.extract_skills(jd_text);

        let matched_skills: BTreeSet<String> = candidate_skills
            .intersection(&jd_skills)
            .cloned()
            .collect();
        let missing_skills: BTreeSet<String> =
            jd_skills.difference(candidate_skills).cloned().collect();

        let skill_match_percent = if jd_skills.is_empty() {
            0.0
        } else {
            round2(100.0 * matched_skills.len() as f64 / jd_skills.len() as f64)
        };

        MatchResult {
            skill_match_percent,
            matched_skills,
            missing_skills,
            jd_skills,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Vocabulary;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new(Arc::new(SkillExtractor::new(Arc::new(Vocabulary::builtin()))))
    }

    fn skills(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matched_and_missing_partition_jd_set() {
        let result = matcher().match_skills(
            &skills(&["python", "sql"]),
            "looking for python developer with docker and kubernetes deployment skills",
        );

        let union: BTreeSet<String> = result
            .matched_skills
            .union(&result.missing_skills)
            .cloned()
            .collect();
        assert_eq!(union, result.jd_skills);
        assert!(result.matched_skills.is_disjoint(&result.missing_skills));
    }

    #[test]
    fn test_match_percent() {
        let result = matcher().match_skills(
            &skills(&["python"]),
            "python and docker required for container deployment",
        );

        assert_eq!(result.jd_skills, skills(&["python", "docker"]));
        assert_eq!(result.matched_skills, skills(&["python"]));
        assert_eq!(result.missing_skills, skills(&["docker"]));
        assert_eq!(result.skill_match_percent, 50.0);
    }

    #[test]
    fn test_empty_jd_scores_zero() {
        let result = matcher().match_skills(&skills(&["python", "sql"]), "no technology words here");
        assert!(result.jd_skills.is_empty());
        assert_eq!(result.skill_match_percent, 0.0);
    }

    #[test]
    fn test_empty_candidate_set() {
        let result = matcher().match_skills(&skills(&[]), "python and sql");
        assert!(result.matched_skills.is_empty());
        assert_eq!(result.missing_skills, result.jd_skills);
        assert_eq!(result.skill_match_percent, 0.0);
    }
}
