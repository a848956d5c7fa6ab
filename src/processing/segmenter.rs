//! Resume section segmentation
//!
//! A small state machine over whitespace-delimited tokens. Anchor detection
//! is substring-based, so tokens like "skillset" or "projections" also
//! trigger a section switch; this coarse behavior is intended and relied on
//! by the rest of the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Skills,
    Experience,
    Education,
    Projects,
}

/// Transition table: the first anchor substring found in a token decides
/// the next state. Table order matches the original screening rules.
const ANCHOR_TRANSITIONS: &[(&str, Section)] = &[
    ("skill", Section::Skills),
    ("experience", Section::Experience),
    ("education", Section::Education),
    ("project", Section::Projects),
];

/// Accumulated text per section. Tokens keep one trailing space each;
/// sections with no content stay empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeSections {
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub projects: String,
}

impl ResumeSections {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Skills => &self.skills,
            Section::Experience => &self.experience,
            Section::Education => &self.education,
            Section::Projects => &self.projects,
        }
    }

    fn buffer_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::Skills => &mut self.skills,
            Section::Experience => &mut self.experience,
            Section::Education => &mut self.education,
            Section::Projects => &mut self.projects,
        }
    }
}

pub struct SectionSegmenter;

impl SectionSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Split normalized resume text into labeled sections. State starts at
    /// NONE; tokens seen before the first anchor are dropped, and anchor
    /// tokens themselves are discarded rather than appended.
    pub fn segment(&self, text: &str) -> ResumeSections {
        let mut sections = ResumeSections::default();
        let mut state: Option<Section> = None;

        for token in text.split_whitespace() {
            let lowered = token.to_lowercase();

            if let Some(next) = Self::transition(&lowered) {
                state = Some(next);
                continue;
            }

            if let Some(section) = state {
                let buffer = sections.buffer_mut(section);
                buffer.push_str(token);
                buffer.push(' ');
            }
        }

        sections
    }

    fn transition(token: &str) -> Option<Section> {
        ANCHOR_TRANSITIONS
            .iter()
            .find(|(anchor, _)| token.contains(anchor))
            .map(|(_, section)| *section)
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Skills => write!(f, "skills"),
            Section::Experience => write!(f, "experience"),
            Section::Education => write!(f, "education"),
            Section::Projects => write!(f, "projects"),
        }
    }
}
