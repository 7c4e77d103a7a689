//! Configuration management for tabscrub.
//!
//! A scrub job is described by a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `TABSCRUB_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tabscrub::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("tabscrub.toml")?;
//! println!("Input: {}", config.input.path.display());
//! println!("Transforms: {}", config.transforms.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! dry_run = false
//!
//! [input]
//! path = "patients.csv"
//!
//! [output]
//! path = "patients.scrubbed.csv"
//! report_path = "reports/scrub.json"
//!
//! [key]
//! value = "${TABSCRUB_KEY}"
//!
//! [columns]
//! age = "integer"
//! dob = "date"
//!
//! [[transforms]]
//! column = "ssn"
//! kind = "encrypt"
//!
//! [[transforms]]
//! column = "zip"
//! kind = "truncate"
//! count = 2
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, InputConfig, KeyConfig, LoggingConfig, OutputConfig, RedactionConfig,
    ScrubConfig, SynthesizeConfig, TransformSpec,
};
pub use secret::{secret_string, SecretString, SecretValue};
