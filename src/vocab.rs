//! Static vocabularies: skills, synonyms, degrees, job titles,
//! disambiguation rules and recommendation templates.
//!
//! Built once at startup and shared read-only across the pipeline; never
//! mutated during request handling.

use std::collections::HashMap;

/// Immutable vocabulary resources for extraction and recommendations.
#[derive(Debug)]
pub struct Vocabulary {
    skills: Vec<String>,
    synonyms: HashMap<String, String>,
    degrees: Vec<(String, Vec<String>)>,
    job_titles: Vec<String>,
    disambiguation: HashMap<String, Vec<String>>,
    advice: Vec<AdviceRule>,
}

/// Advice template for a category of missing skills.
#[derive(Debug)]
pub struct AdviceRule {
    pub category: &'static str,
    pub skills: Vec<String>,
    pub template: &'static str,
}

impl Vocabulary {
    /// Built-in vocabulary covering the supported skill domains.
    pub fn builtin() -> Self {
        let skills = [
            // Programming
            "python", "java", "c", "c++", "javascript",
            // Web
            "html", "css", "responsive web design", "react", "node", "express",
            // Backend
            "django", "flask", "rest api",
            // Databases
            "sql", "mysql", "postgresql", "mongodb", "databases",
            // DevOps / Cloud
            "docker", "aws", "linux", "git",
            // Data / AI
            "machine learning", "deep learning", "nlp",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let synonyms: HashMap<String, String> = [
            ("js", "javascript"),
            ("nodejs", "node"),
            ("py", "python"),
            ("nlp", "natural language processing"),
            ("ml", "machine learning"),
            ("dl", "deep learning"),
            ("db", "databases"),
            ("sql db", "sql"),
            ("postgres", "postgresql"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let degrees = [
            ("btech", vec!["btech", "b.tech"]),
            ("mtech", vec!["mtech", "m.tech"]),
            ("bsc", vec!["bsc"]),
            ("msc", vec!["msc"]),
        ]
        .iter()
        .map(|(code, patterns)| {
            (
                code.to_string(),
                patterns.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect();

        let job_titles = [
            "intern",
            "trainee",
            "developer",
            "software developer",
            "software engineer",
            "backend developer",
            "frontend developer",
            "full stack developer",
            "fullstack developer",
            "data analyst",
            "data scientist",
            "ml engineer",
            "ai engineer",
            "campus ambassador",
            "project lead",
            "team lead",
            "technical lead",
            "engineering intern",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        // Context words an ambiguous skill needs somewhere in the document
        // to count as a technology mention.
        let disambiguation: HashMap<String, Vec<String>> = [
            ("spring", vec!["java", "boot", "mvc", "hibernate", "microservice"]),
            ("react", vec!["javascript", "node", "frontend", "library", "framework"]),
            ("docker", vec!["container", "kubernetes", "devops", "deployment"]),
        ]
        .iter()
        .map(|(k, words)| {
            (
                k.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect();

        let advice = vec![
            AdviceRule {
                category: "backend frameworks",
                skills: vec!["django".into(), "flask".into()],
                template: "Add a backend project using Django or Flask and highlight API development.",
            },
            AdviceRule {
                category: "databases",
                skills: vec!["sql".into(), "mysql".into(), "postgresql".into()],
                template: "Showcase database usage by mentioning how you designed tables or optimized queries.",
            },
            AdviceRule {
                category: "containerization",
                skills: vec!["docker".into()],
                template: "Learn Docker basics and add a simple containerized project to your resume.",
            },
            AdviceRule {
                category: "cloud",
                skills: vec!["aws".into()],
                template: "Gain exposure to AWS by deploying a small app and mentioning it under projects.",
            },
        ];

        Self {
            skills,
            synonyms,
            degrees,
            job_titles,
            disambiguation,
            advice,
        }
    }

    /// All matchable skill patterns: the skill list plus every synonym key,
    /// so shorthand like "js" or "py" is matched and then canonicalized.
    pub fn matchable_skills(&self) -> Vec<String> {
        let mut patterns = self.skills.clone();
        for key in self.synonyms.keys() {
            if !patterns.iter().any(|s| s == key) {
                patterns.push(key.clone());
            }
        }
        patterns
    }

    /// Canonical form of a matched skill after synonym normalization.
    pub fn canonical<'a>(&'a self, skill: &'a str) -> &'a str {
        self.synonyms.get(skill).map(String::as_str).unwrap_or(skill)
    }

    /// Degree codes with the literal tokens that indicate them.
    pub fn degrees(&self) -> &[(String, Vec<String>)] {
        &self.degrees
    }

    pub fn job_titles(&self) -> &[String] {
        &self.job_titles
    }

    /// Tech-context words for an ambiguous skill, if it is registered.
    pub fn disambiguation_context(&self, skill: &str) -> Option<&[String]> {
        self.disambiguation.get(skill).map(Vec::as_slice)
    }

    /// Advice template for a missing skill, if any category covers it.
    pub fn advice_for(&self, skill: &str) -> Option<&'static str> {
        self.advice
            .iter()
            .find(|rule| rule.skills.iter().any(|s| s == skill))
            .map(|rule| rule.template)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
