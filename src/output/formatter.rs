//! Rendering screening reports for the console and machine formats

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::pipeline::{RankedCandidate, ScreeningReport};
use colored::Colorize;
use std::fmt::Write as _;

pub struct ReportFormatter {
    detailed: bool,
}

impl ReportFormatter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }

    pub fn format_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.console_report(report)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Markdown => Ok(self.markdown_report(report)),
        }
    }

    pub fn format_ranking(
        &self,
        ranking: &[RankedCandidate],
        format: &OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.console_ranking(ranking)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(ranking)?),
            OutputFormat::Markdown => Ok(self.markdown_ranking(ranking)),
        }
    }

    fn console_report(&self, report: &ScreeningReport) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", "Resume Screening Report".bold().underline());
        let _ = writeln!(out, "Candidate: {}", report.identity.bold());
        let _ = writeln!(
            out,
            "Final match: {}",
            format_percent(report.final_score.final_match_percent)
        );
        let _ = writeln!(
            out,
            "Skill match: {}  Lexical: {:.2}%  Semantic: {:.2}%",
            format_percent(report.match_result.skill_match_percent),
            report.similarity.lexical,
            report.similarity.semantic
        );

        let _ = writeln!(out, "\n{}", "Matched skills".green().bold());
        let _ = writeln!(out, "  {}", join_or_dash(&report.match_result.matched_skills));

        let _ = writeln!(out, "{}", "Missing skills".red().bold());
        let _ = writeln!(out, "  {}", join_or_dash(&report.match_result.missing_skills));

        if !report.recommendations.is_empty() {
            let _ = writeln!(out, "\n{}", "Recommendations".cyan().bold());
            for (i, suggestion) in report.recommendations.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, suggestion);
            }
        }

        if self.detailed {
            let _ = writeln!(out, "\n{}", "Score breakdown".bold());
            for (component, score) in &report.final_score.breakdown {
                let _ = writeln!(
                    out,
                    "  {:<12} {:>6.2}%  (weight {:.2})",
                    component, score, report.final_score.weights_used[component]
                );
            }

            let _ = writeln!(
                out,
                "\nExperience: {} years (required: {})",
                report.profile.experience_years, report.required_experience
            );
            let _ = writeln!(out, "Education: {}", join_or_dash(&report.profile.education));

            if let Some(context) = &report.skill_context {
                let _ = writeln!(out, "\n{}", "Skill context".bold());
                let _ = writeln!(out, "  {}", context.highlighted);
            }

            let _ = writeln!(
                out,
                "\nProcessed in {}ms",
                report.processing_time_ms
            );
        }

        out
    }

    fn markdown_report(&self, report: &ScreeningReport) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "# Resume Screening Report\n");
        let _ = writeln!(out, "- **Candidate**: {}", report.identity);
        let _ = writeln!(
            out,
            "- **Final match**: {:.2}%",
            report.final_score.final_match_percent
        );
        let _ = writeln!(
            out,
            "- **Skill match**: {:.2}%",
            report.match_result.skill_match_percent
        );
        let _ = writeln!(
            out,
            "- **Lexical / semantic similarity**: {:.2}% / {:.2}%",
            report.similarity.lexical, report.similarity.semantic
        );

        let _ = writeln!(out, "\n## Matched skills\n");
        let _ = writeln!(out, "{}", join_or_dash(&report.match_result.matched_skills));
        let _ = writeln!(out, "\n## Missing skills\n");
        let _ = writeln!(out, "{}", join_or_dash(&report.match_result.missing_skills));

        if !report.recommendations.is_empty() {
            let _ = writeln!(out, "\n## Recommendations\n");
            for suggestion in &report.recommendations {
                let _ = writeln!(out, "1. {}", suggestion);
            }
        }

        let _ = writeln!(out, "\n## Score breakdown\n");
        let _ = writeln!(out, "| Component | Score | Weight |");
        let _ = writeln!(out, "|---|---|---|");
        for (component, score) in &report.final_score.breakdown {
            let _ = writeln!(
                out,
                "| {} | {:.2}% | {:.2} |",
                component, score, report.final_score.weights_used[component]
            );
        }

        if let Some(context) = &report.skill_context {
            let _ = writeln!(out, "\n## Skill context\n");
            let _ = writeln!(out, "> {}", context.highlighted);
        }

        let _ = writeln!(
            out,
            "\n_Generated {}_",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        );

        out
    }

    fn console_ranking(&self, ranking: &[RankedCandidate]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Candidate Ranking".bold().underline());

        for candidate in ranking {
            let _ = writeln!(
                out,
                "{:>3}. {:<30} {:<24} {}",
                candidate.rank,
                candidate.label,
                candidate.identity,
                format_percent(candidate.final_match_percent)
            );
        }

        out
    }

    fn markdown_ranking(&self, ranking: &[RankedCandidate]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Candidate Ranking\n");
        let _ = writeln!(out, "| Rank | File | Candidate | Final match | Skill match |");
        let _ = writeln!(out, "|---|---|---|---|---|");
        for candidate in ranking {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {:.2}% | {:.2}% |",
                candidate.rank,
                candidate.label,
                candidate.identity,
                candidate.final_match_percent,
                candidate.skill_match_percent
            );
        }
        out
    }
}

fn format_percent(value: f64) -> String {
    let text = format!("{:.2}%", value);
    if value >= 70.0 {
        text.green().bold().to_string()
    } else if value >= 40.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

fn join_or_dash<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let joined = items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::aggregator::ScoreWeights;
    use crate::processing::pipeline::ScreeningPipeline;

    fn sample_report() -> ScreeningReport {
        let pipeline = ScreeningPipeline::new(ScoreWeights::default(), None);
        pipeline.screen(
            "John Smith\nSkills: Python, SQL\n3 years experience",
            "Python and Docker developer, 2 years experience, container work",
            None,
        )
    }

    #[test]
    fn test_json_roundtrip() {
        let report = sample_report();
        let json = ReportFormatter::new(false)
            .format_report(&report, &OutputFormat::Json)
            .unwrap();
        let parsed: ScreeningReport = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.final_score.final_match_percent,
            report.final_score.final_match_percent
        );
    }

    #[test]
    fn test_markdown_contains_key_fields() {
        let report = sample_report();
        let markdown = ReportFormatter::new(false)
            .format_report(&report, &OutputFormat::Markdown)
            .unwrap();
        assert!(markdown.contains("# Resume Screening Report"));
        assert!(markdown.contains("John Smith"));
        assert!(markdown.contains("docker"));
    }

    #[test]
    fn test_console_lists_recommendations() {
        colored::control::set_override(false);
        let report = sample_report();
        let console = ReportFormatter::new(true)
            .format_report(&report, &OutputFormat::Console)
            .unwrap();
        assert!(console.contains("Candidate: John Smith"));
        assert!(console.contains("Recommendations"));
    }
}
