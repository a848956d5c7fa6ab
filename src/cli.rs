//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Score how well a resume matches a job description")]
#[command(
    long_about = "Match resumes against job descriptions using skill extraction, TF-IDF and embedding similarity, with actionable feedback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen one resume against a job description
    Screen {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file instead of stdout
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Override score weights, e.g. "skills=0.5,experience=0.3,education=0.1,keywords=0.1"
        #[arg(short, long)]
        weights: Option<String>,

        /// Show score breakdown and skill context
        #[arg(short, long)]
        detailed: bool,
    },

    /// Rank multiple resumes against one job description
    Rank {
        /// Resume files to rank
        #[arg(short, long, num_args = 1.., required = true)]
        resumes: Vec<PathBuf>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Concurrent screenings (defaults to the configured bound)
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Compare model scores against human labels
    Eval {
        /// CSV file with resume_file, jd_file, human_score columns
        #[arg(short, long)]
        labels: PathBuf,

        /// Directory containing resumes/ and jds/ subdirectories
        #[arg(short, long)]
        data_dir: PathBuf,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Validate that a file has one of the allowed extensions
pub fn validate_file_extension(
    path: &Path,
    allowed: &[&str],
) -> std::result::Result<(), String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if allowed.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Unsupported file extension '{}'. Allowed: {}",
            extension,
            allowed.join(", ")
        ))
    }
}

/// Parse an output format name
pub fn parse_output_format(name: &str) -> std::result::Result<OutputFormat, String> {
    match name.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        other => Err(format!(
            "Unknown output format '{}'. Use console, json or markdown",
            other
        )),
    }
}

/// Parse "key=value,key=value" weight overrides into a map
pub fn parse_weight_overrides(spec: &str) -> std::result::Result<HashMap<String, f64>, String> {
    let mut map = HashMap::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got '{}'", part))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("Invalid weight value in '{}'", part))?;
        map.insert(key.trim().to_string(), value);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("resume.pdf"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("resume.PDF"), &["pdf"]).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("resume"), &["pdf"]).is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert!(matches!(parse_output_format("json"), Ok(OutputFormat::Json)));
        assert!(matches!(parse_output_format("MD"), Ok(OutputFormat::Markdown)));
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn test_parse_weight_overrides() {
        let map = parse_weight_overrides("skills=0.6, experience=0.2,education=0.1,keywords=0.1")
            .unwrap();
        assert_eq!(map["skills"], 0.6);
        assert_eq!(map["experience"], 0.2);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_parse_weight_overrides_rejects_garbage() {
        assert!(parse_weight_overrides("skills").is_err());
        assert!(parse_weight_overrides("skills=abc").is_err());
    }
}
