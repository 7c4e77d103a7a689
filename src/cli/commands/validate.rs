//! Validate config command implementation

use crate::anonymization::request::TransformKind;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates; this also resolves the configured key and
    /// flags transforms whose kind would be skipped at run time.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let key_source = match config.configured_key() {
            Ok(Some(key)) => format!("configured ({})", key.fingerprint()),
            Ok(None) => "generated per run".to_string(),
            Err(e) => {
                println!("❌ Configured key is unusable");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Input: {}", config.input.path.display());
        println!(
            "  Output: {}",
            config
                .output
                .path
                .as_ref()
                .map_or("(none)".to_string(), |p| p.display().to_string())
        );
        println!("  Key: {key_source}");
        println!("  Typed Columns: {}", config.columns.len());
        println!("  Transforms: {}", config.transforms.len());

        for spec in &config.transforms {
            if let Err(e) = spec.kind.parse::<TransformKind>() {
                println!("  ⚠️  {}: {e} (will be skipped)", spec.column);
            }
        }
        println!();

        Ok(0)
    }
}
