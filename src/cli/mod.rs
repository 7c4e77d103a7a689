//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for tabscrub using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// tabscrub - column-level anonymization for tabular data
#[derive(Parser, Debug)]
#[command(name = "tabscrub")]
#[command(version, about, long_about = None)]
#[command(author = "Tabscrub Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tabscrub.toml", env = "TABSCRUB_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TABSCRUB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging settings for this invocation
    ///
    /// Commands that read a job file take `application.log_level` and
    /// `[logging]` from it; `--log-level` wins over the file. When the file
    /// does not load, logging falls back to the console at `info` and the
    /// command reports the load error itself.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let job = match self.command {
            Commands::Scrub(_) | Commands::ValidateConfig(_) => load_config(&self.config).ok(),
            _ => None,
        };

        let (file_level, logging) = match job {
            Some(config) => (Some(config.application.log_level), config.logging),
            None => (None, LoggingConfig::default()),
        };

        let level = self
            .log_level
            .clone()
            .or(file_level)
            .unwrap_or_else(|| "info".to_string());
        (level, logging)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the configured transforms to the input table
    Scrub(commands::scrub::ScrubArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Generate an encryption key file
    Keygen(commands::keygen::KeygenArgs),

    /// List transform kinds, column types, synthesize categories and redaction placeholders
    Categories(commands::categories::CategoriesArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
