//! Recommendation generation from skill gaps and strengths

use crate::processing::matcher::MatchResult;
use crate::vocab::Vocabulary;
use std::collections::BTreeSet;
use std::sync::Arc;

const MAX_RECOMMENDATIONS: usize = 5;

pub struct RecommendationGenerator {
    vocab: Arc<Vocabulary>,
}

impl RecommendationGenerator {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    /// Advice strings for missing skills followed by strength
    /// reinforcement, capped at five entries total.
    pub fn generate(&self, match_result: &MatchResult, strengths: &[String]) -> Vec<String> {
        let mut suggestions = Vec::new();

        for skill in &match_result.missing_skills {
            match self.vocab.advice_for(skill) {
                Some(template) => suggestions.push(template.to_string()),
                None => suggestions.push(format!(
                    "Consider adding experience or coursework related to {}.",
                    skill
                )),
            }
        }

        for skill in strengths {
            suggestions.push(format!(
                "You mention {} only once; reinforce it with a project or a measurable result.",
                skill
            ));
        }

        suggestions.truncate(MAX_RECOMMENDATIONS);
        suggestions
    }

    /// JD-required skills the resume mentions exactly once: present but
    /// not reinforced.
    pub fn underemphasized_strengths(
        &self,
        cleaned_resume: &str,
        jd_skills: &BTreeSet<String>,
    ) -> Vec<String> {
        let lowered = cleaned_resume.to_lowercase();

        jd_skills
            .iter()
            .filter(|skill| lowered.matches(skill.as_str()).count() == 1)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> RecommendationGenerator {
        RecommendationGenerator::new(Arc::new(Vocabulary::builtin()))
    }

    fn match_result(missing: &[&str]) -> MatchResult {
        let missing_skills: BTreeSet<String> = missing.iter().map(|s| s.to_string()).collect();
        MatchResult {
            skill_match_percent: 0.0,
            matched_skills: BTreeSet::new(),
            missing_skills: missing_skills.clone(),
            jd_skills: missing_skills,
        }
    }

    #[test]
    fn test_categorized_advice() {
        let suggestions = generator().generate(&match_result(&["docker"]), &[]);
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].contains("Docker"));
    }

    #[test]
    fn test_generic_fallback_advice() {
        let suggestions = generator().generate(&match_result(&["linux"]), &[]);
        assert_eq!(
            suggestions[0],
            "Consider adding experience or coursework related to linux."
        );
    }

    #[test]
    fn test_strength_advice_appended_after_gaps() {
        let suggestions =
            generator().generate(&match_result(&["docker"]), &["python".to_string()]);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].contains("Docker"));
        assert!(suggestions[1].contains("python"));
    }

    #[test]
    fn test_capped_at_five() {
        let suggestions = generator().generate(
            &match_result(&["docker", "aws", "linux", "git", "mongodb"]),
            &["python".to_string()],
        );
        assert_eq!(suggestions.len(), 5);
    }

    #[test]
    fn test_no_gaps_no_advice() {
        let suggestions = generator().generate(&match_result(&[]), &[]);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_underemphasized_requires_exactly_one_mention() {
        let generator = generator();
        let jd_skills: BTreeSet<String> =
            ["python", "sql", "docker"].iter().map(|s| s.to_string()).collect();

        let resume = "python once. sql here and sql there.";
        let strengths = generator.underemphasized_strengths(resume, &jd_skills);

        // python appears once, sql twice, docker never.
        assert_eq!(strengths, vec!["python".to_string()]);
    }
}
