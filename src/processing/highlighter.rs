//! Skill context highlighting
//!
//! Produces at most one annotated snippet per call: a window around the
//! first skill occurrence found, with every located skill emphasized
//! inside it. The skill list attached to the snippet records skills found
//! anywhere in the document, not only inside the window; that association
//! is intentionally coarse and is surfaced to product owners rather than
//! tightened here.

use regex::Regex;
use serde::{Deserialize, Serialize};

const WINDOW_RADIUS: usize = 60;

/// One annotated snippet with the skills located during the scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillContext {
    pub snippet: String,
    pub skills: Vec<String>,
    pub highlighted: String,
}

pub struct ContextHighlighter;

impl ContextHighlighter {
    pub fn new() -> Self {
        Self
    }

    /// Scan the skills in the given order. The first occurrence found
    /// fixes the snippet window; every skill occurring anywhere in the
    /// text joins the found set and is emphasized within the snippet.
    /// Returns `None` when no skill occurs at all.
    pub fn find_context(&self, text: &str, skills: &[String]) -> Option<SkillContext> {
        let mut snippet: Option<String> = None;
        let mut found: Vec<String> = Vec::new();

        for skill in skills {
            let Ok(pattern) = Regex::new(&format!("(?i){}", regex::escape(skill))) else {
                continue;
            };

            if let Some(mat) = pattern.find(text) {
                if snippet.is_none() {
                    snippet = Some(Self::window(text, mat.start(), mat.end()));
                }
                found.push(skill.clone());
            }
        }

        let snippet = snippet?;

        let mut highlighted = snippet.clone();
        for skill in &found {
            if let Ok(pattern) = Regex::new(&format!("(?i){}", regex::escape(skill))) {
                highlighted = pattern
                    .replace_all(&highlighted, |caps: &regex::Captures| {
                        format!("**{}**", &caps[0])
                    })
                    .to_string();
            }
        }

        Some(SkillContext {
            snippet,
            skills: found,
            highlighted,
        })
    }

    /// Carve a window around a match, clamped to the text bounds and
    /// snapped to char boundaries, framed with ellipsis markers.
    fn window(text: &str, match_start: usize, match_end: usize) -> String {
        let mut start = match_start.saturating_sub(WINDOW_RADIUS);
        while !text.is_char_boundary(start) {
            start -= 1;
        }

        let mut end = (match_end + WINDOW_RADIUS).min(text.len());
        while end < text.len() && !text.is_char_boundary(end) {
            end += 1;
        }

        format!("...{}...", text[start..end].trim())
    }
}

impl Default for ContextHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
