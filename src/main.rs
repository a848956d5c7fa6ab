//! Resume screener: match resumes against job descriptions

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::Config;
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::InputManager;
use resume_screener::output::ReportFormatter;
use resume_screener::processing::aggregator::ScoreWeights;
use resume_screener::processing::pipeline::{RankInput, ScreeningPipeline};
use resume_screener::evaluation;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Screen {
            resume,
            job,
            output,
            save,
            weights,
            detailed,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(ScreenerError::InvalidInput)?;

            let weights_override = match &weights {
                Some(spec) => {
                    let map = cli::parse_weight_overrides(spec)
                        .map_err(ScreenerError::MalformedWeights)?;
                    Some(ScoreWeights::from_map(&map)?)
                }
                None => None,
            };

            let mut manager = InputManager::new();
            let resume_text = manager.extract_text(&resume).await?;
            let jd_text = manager.extract_text(&job).await?;

            info!("Screening {} against {}", resume.display(), job.display());
            let pipeline = ScreeningPipeline::from_config(&config);
            let report = pipeline.screen(&resume_text, &jd_text, weights_override);

            let formatter = ReportFormatter::new(detailed || config.output.detailed);
            let rendered = formatter.format_report(&report, &output_format)?;

            write_output(rendered, save)?;
        }

        Commands::Rank {
            resumes,
            job,
            output,
            workers,
        } => {
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(ScreenerError::InvalidInput)?;

            let mut manager = InputManager::new();
            let jd_text = manager.extract_text(&job).await?;

            let progress = ProgressBar::new(resumes.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                    .expect("Invalid progress template"),
            );

            // One unreadable resume must not sink the batch: log and move on.
            let mut batch = Vec::new();
            for path in &resumes {
                progress.set_message(path.display().to_string());
                match manager.extract_text(path).await {
                    Ok(text) => batch.push(RankInput {
                        label: path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| path.display().to_string()),
                        resume_text: text,
                    }),
                    Err(e) => warn!("Skipping {}: {}", path.display(), e),
                }
                progress.inc(1);
            }
            progress.finish_and_clear();

            let worker_count = workers.unwrap_or(config.processing.batch_workers);
            let pipeline = Arc::new(ScreeningPipeline::from_config(&config));
            let ranking = pipeline.rank(batch, &jd_text, worker_count).await;

            let formatter = ReportFormatter::new(config.output.detailed);
            let rendered = formatter.format_ranking(&ranking, &output_format)?;
            println!("{}", rendered);
        }

        Commands::Eval { labels, data_dir } => {
            let labeled_pairs = evaluation::read_labels(&labels)?;
            info!("Evaluating {} labeled pairs", labeled_pairs.len());

            let pipeline = ScreeningPipeline::from_config(&config);
            let outcome = evaluation::run(&pipeline, &labeled_pairs, &data_dir).await;

            println!("===== EVALUATION RESULTS =====");
            println!("Human scores : {:?}", outcome.human_scores);
            println!(
                "Model scores : {:?}",
                outcome
                    .model_scores
                    .iter()
                    .map(|s| (s * 100.0).round() / 100.0)
                    .collect::<Vec<_>>()
            );
            if outcome.skipped > 0 {
                println!("Skipped rows : {}", outcome.skipped);
            }
            match outcome.spearman {
                Some(corr) => println!("Spearman correlation: {:.2}", corr),
                None => println!("Spearman correlation: not enough comparable rows"),
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    ScreenerError::Configuration(format!("Failed to render config: {}", e))
                })?;
                println!("{}", rendered);
            }
            ConfigAction::Reset => {
                let defaults = Config::default();
                defaults.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

fn write_output(rendered: String, save: Option<PathBuf>) -> Result<()> {
    match save {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
