//! Candidate profile assembly

use crate::processing::disambiguator::SkillDisambiguator;
use crate::processing::extractor::SkillExtractor;
use crate::processing::segmenter::ResumeSections;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structured view of one resume. Built once per screening, immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub skills: BTreeSet<String>,
    pub experience_years: u32,
    pub education: BTreeSet<String>,
    pub job_titles: BTreeSet<String>,
}

pub struct ProfileBuilder<'a> {
    extractor: &'a SkillExtractor,
    disambiguator: &'a SkillDisambiguator,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(extractor: &'a SkillExtractor, disambiguator: &'a SkillDisambiguator) -> Self {
        Self {
            extractor,
            disambiguator,
        }
    }

    /// Assemble a profile from segmented sections. Skills come from the
    /// skills and projects sections and are disambiguated against the full
    /// cleaned text; experience years scan the full text, the same way the
    /// JD side reads its requirement; degrees and titles read their own
    /// sections.
    pub fn build(&self, sections: &ResumeSections, full_text: &str) -> Profile {
        let mut skill_text = String::with_capacity(sections.skills.len() + sections.projects.len() + 1);
        skill_text.push_str(&sections.skills);
        skill_text.push(' ');
        skill_text.push_str(&sections.projects);

        let raw_skills = self.extractor.extract_skills(&skill_text);
        let skills = self.disambiguator.filter(&raw_skills, full_text);

        Profile {
            skills,
            experience_years: self.extractor.extract_experience_years(full_text),
            education: self.extractor.extract_degrees(&sections.education),
            job_titles: self.extractor.extract_job_titles(&sections.experience),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::segmenter::SectionSegmenter;
    use crate::vocab::Vocabulary;
    use std::sync::Arc;

    fn build_profile(text: &str) -> Profile {
        let vocab = Arc::new(Vocabulary::builtin());
        let extractor = SkillExtractor::new(vocab.clone());
        let disambiguator = SkillDisambiguator::new(vocab);
        let sections = SectionSegmenter::new().segment(text);
        ProfileBuilder::new(&extractor, &disambiguator).build(&sections, text)
    }

    #[test]
    fn test_profile_from_sectioned_resume() {
        let profile = build_profile(
            "experience software engineer at acme for 3 years \
             skills python django sql education btech in computer science",
        );

        assert!(profile.skills.contains("python"));
        assert!(profile.skills.contains("django"));
        assert!(profile.skills.contains("sql"));
        assert_eq!(profile.experience_years, 3);
        assert!(profile.education.contains("btech"));
        assert!(profile.job_titles.contains("software engineer"));
    }

    #[test]
    fn test_projects_section_contributes_skills() {
        let profile = build_profile("projects built a flask app with postgresql");
        assert!(profile.skills.contains("flask"));
        assert!(profile.skills.contains("postgresql"));
    }

    #[test]
    fn test_ambiguous_skill_dropped_without_context() {
        // "docker" in the skills section but no container context anywhere.
        let profile = build_profile("skills docker sailing navigation");
        assert!(!profile.skills.contains("docker"));
    }

    #[test]
    fn test_empty_resume_yields_empty_profile() {
        let profile = build_profile("");
        assert!(profile.skills.is_empty());
        assert_eq!(profile.experience_years, 0);
        assert!(profile.education.is_empty());
        assert!(profile.job_titles.is_empty());
    }
}
