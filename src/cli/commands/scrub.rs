//! Scrub command implementation
//!
//! Reads the input CSV, runs the configured transforms and writes the scrubbed
//! table, the key and the JSON report.

use crate::adapters::csv_io::{read_table, write_table, CsvOptions};
use crate::anonymization::cipher::{AesGcmCipher, SymmetricCipher};
use crate::anonymization::codec::ValueCodec;
use crate::anonymization::engine::ScrubEngine;
use crate::anonymization::redactor::{PatternRegistry, RegexRedactor};
use crate::anonymization::synth::FakerGenerator;
use crate::config::{load_config, ScrubConfig};
use crate::domain::Table;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the scrub command
#[derive(Args, Debug)]
pub struct ScrubArgs {
    /// Dry run mode - print the report without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Override the input CSV file
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Override the output CSV file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Use the raw key in this file instead of the configured key
    #[arg(long, value_name = "PATH")]
    pub key_file: Option<PathBuf>,

    /// Write the key used for this run to this file
    #[arg(long, value_name = "PATH")]
    pub export_key: Option<PathBuf>,

    /// Seed for synthetic values
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ScrubArgs {
    /// Execute the scrub command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting scrub command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let dry_run = config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let options = CsvOptions::new(config.input.delimiter_byte(), config.columns.clone());
        let table = read_table(&config.input.path, &options)
            .with_context(|| format!("Failed to read {}", config.input.path.display()))?;
        println!(
            "📄 Loaded {} rows x {} columns from {}",
            table.row_count(),
            table.columns().len(),
            config.input.path.display()
        );

        let engine = build_engine(&config, &table).context("Failed to initialize scrub engine")?;
        let requests = config
            .requests(engine.key())
            .context("Failed to build transform requests")?;

        println!("🚀 Applying {} transform(s)...", requests.len());
        let mut outcome = match engine.apply_all(&table, &requests) {
            Ok(outcome) => outcome,
            Err(e) => {
                crate::log_error_with_context!(&e, "Batch aborted");
                eprintln!("❌ Scrub failed: {e}");
                return Ok(5);
            }
        };
        outcome.report.dry_run = dry_run;

        print!("{}", outcome.report.format_console());

        if dry_run {
            return Ok(0);
        }

        if let Some(ref path) = config.output.path {
            write_table(&outcome.table, path, config.input.delimiter_byte())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Scrubbed table written to {}", path.display());
        } else {
            println!("⚠️  No output.path configured; scrubbed table not written");
        }

        if let Some(ref path) = config.key.export_path {
            engine
                .export_key(path)
                .with_context(|| format!("Failed to export key to {}", path.display()))?;
            println!("🔑 Key exported to {}", path.display());
        }

        if let Some(ref path) = config.output.report_path {
            outcome
                .report
                .write_to_file(path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("📝 Report written to {}", path.display());
        }

        Ok(0)
    }

    fn apply_overrides(&self, config: &mut ScrubConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if let Some(ref path) = self.input {
            config.input.path = path.clone();
        }
        if let Some(ref path) = self.output {
            config.output.path = Some(path.clone());
        }
        if let Some(ref path) = self.key_file {
            config.key.value = None;
            config.key.import_path = Some(path.clone());
        }
        if let Some(ref path) = self.export_key {
            config.key.export_path = Some(path.clone());
        }
        if let Some(seed) = self.seed {
            config.synthesize.seed = Some(seed);
        }
    }
}

/// Build an engine for `table` from the job configuration
///
/// Uses the configured key when there is one and generates a fresh key
/// otherwise.
pub fn build_engine(config: &ScrubConfig, table: &Table) -> crate::domain::Result<ScrubEngine> {
    let key = match config.configured_key()? {
        Some(key) => {
            tracing::info!(key = %key.fingerprint(), "Using configured key");
            key
        }
        None => {
            let key = AesGcmCipher::new().generate_key()?;
            tracing::info!(key = %key.fingerprint(), "Generated new key");
            key
        }
    };

    let mut codec = ValueCodec::new(key)?;

    if let Some(seed) = config.synthesize.seed {
        codec = codec.with_generator(Arc::new(FakerGenerator::seeded(seed)));
    }

    if let Some(ref library) = config.redaction.pattern_library {
        let registry = PatternRegistry::from_file(library)?;
        codec = codec.with_redactor(Arc::new(RegexRedactor::with_registry(registry)));
    }

    Ok(ScrubEngine::with_codec(table, codec))
}
