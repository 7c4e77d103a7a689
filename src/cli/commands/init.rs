//! Init command implementation
//!
//! This module implements the `init` command for generating a sample job
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "tabscrub.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing tabscrub configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your input file and transforms", self.output);
                println!("  2. Generate a shared key if needed: tabscrub keygen");
                println!("  3. Validate configuration: tabscrub validate-config");
                println!("  4. Preview the run: tabscrub scrub --dry-run");
                println!("  5. Run the job: tabscrub scrub");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# tabscrub job configuration

[application]
log_level = "info"
dry_run = false

[input]
path = "data/patients.csv"
delimiter = ","

[output]
path = "out/patients_scrubbed.csv"
report_path = "out/report.json"

[key]
# value = "${TABSCRUB_KEY}"
export_path = "out/job.key"

[columns]
age = "integer"

[[transforms]]
column = "name"
kind = "synthesize"
category = "name"

[[transforms]]
column = "ssn"
kind = "encrypt"

[[transforms]]
column = "zip"
kind = "truncate"
count = 2

[[transforms]]
column = "notes"
kind = "redact"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# tabscrub job configuration
#
# A job reads one CSV file, applies an ordered list of column transforms
# and writes the scrubbed table, the key and a JSON report.
#
# Values of the form ${VAR} are substituted from the environment. Any
# setting can also be overridden with TABSCRUB_<SECTION>_<KEY>.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (print the report, write nothing)
dry_run = false

# ============================================================================
# Input
# ============================================================================
[input]
# CSV file with a header row
path = "data/patients.csv"

# Single-byte field delimiter
delimiter = ","

# ============================================================================
# Output
# ============================================================================
[output]
# Scrubbed CSV file (omit to skip writing the table)
path = "out/patients_scrubbed.csv"

# JSON batch report (optional)
report_path = "out/report.json"

# ============================================================================
# Key Management
# ============================================================================
[key]
# Base64 encoded 32-byte key (use an environment variable)
# value = "${TABSCRUB_KEY}"

# Or a file holding the raw key bytes, e.g. from `tabscrub keygen`
# import_path = "keys/job.key"

# Write the key used for this run so the encrypted columns can be decrypted
# later. Without value or import_path a fresh key is generated per run.
export_path = "out/job.key"

# ============================================================================
# Synthetic Data
# ============================================================================
[synthesize]
# Fixed seed for reproducible synthetic values (optional)
# seed = 42

# ============================================================================
# Redaction
# ============================================================================
[redaction]
# Custom pattern library in TOML (optional, built-in patterns otherwise)
# pattern_library = "patterns/redaction_patterns.toml"

# ============================================================================
# Column Types
# ============================================================================
# Columns not listed here are read as strings.
# Types: string, integer, float, date, datetime, bytes, opaque
[columns]
age = "integer"
admitted = "date"

# ============================================================================
# Transforms (applied in order)
# ============================================================================
# kind: encrypt | decrypt | synthesize | truncate | redact
# Requests with an unknown kind or synthesize category, a missing column or a
# missing parameter are skipped and listed in the report.

# Replace every distinct name with a consistent fake name
[[transforms]]
column = "name"
kind = "synthesize"
category = "name"    # see `tabscrub categories`

# Encrypt with the job key
[[transforms]]
column = "ssn"
kind = "encrypt"

# Keep the first three digits of each ZIP code
[[transforms]]
column = "zip"
kind = "truncate"
count = 2            # characters to drop
from_end = true      # drop from the end (false drops from the start)

# Replace emails, phone numbers and similar spans with placeholders
[[transforms]]
column = "notes"
kind = "redact"

# Decrypt a previously encrypted column
# [[transforms]]
# column = "mrn"
# kind = "decrypt"
# key_file = "keys/previous.key"
# target_type = "integer"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrubConfig;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "tabscrub.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "tabscrub.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generated_configs_parse() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: ScrubConfig = toml::from_str(&content).unwrap();
            assert!(config.validate().is_ok());
            assert_eq!(config.transforms.len(), 4);
        }
    }

    #[test]
    fn test_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabscrub.toml");
        std::fs::write(&path, "").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
    }
}
