//! Resume screener library

pub mod cli;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod input;
pub mod output;
pub mod processing;
pub mod vocab;

pub use config::Config;
pub use error::{Result, ScreenerError};
pub use processing::pipeline::{ScreeningPipeline, ScreeningReport};
