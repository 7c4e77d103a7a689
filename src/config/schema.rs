//! Configuration schema types
//!
//! This module defines the structure of a scrub job file.

use crate::anonymization::cipher::CipherKey;
use crate::anonymization::request::{TransformKind, TransformRequest};
use crate::config::SecretString;
use crate::domain::{ColumnType, Result};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main tabscrub configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input table
    pub input: InputConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Encryption key source and export
    #[serde(default)]
    pub key: KeyConfig,

    /// Synthetic value generation
    #[serde(default)]
    pub synthesize: SynthesizeConfig,

    /// Redaction pattern library
    #[serde(default)]
    pub redaction: RedactionConfig,

    /// Declared column types; unlisted columns are strings
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnType>,

    /// Ordered transform requests
    #[serde(default)]
    pub transforms: Vec<TransformSpec>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScrubConfig {
    /// Validates the configuration
    ///
    /// Transform kinds are not checked here: an unknown kind is skipped by the
    /// batch, not rejected up front.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.key.validate()?;
        for (i, spec) in self.transforms.iter().enumerate() {
            if spec.column.trim().is_empty() {
                return Err(format!("transforms[{i}].column cannot be empty"));
            }
        }
        self.logging.validate()?;
        Ok(())
    }

    /// Declared type for `column`
    pub fn column_type(&self, column: &str) -> ColumnType {
        self.columns.get(column).copied().unwrap_or_default()
    }

    /// Key configured for this job, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the inline key is not valid base64 of the right
    /// length, or the key file cannot be read.
    pub fn configured_key(&self) -> Result<Option<CipherKey>> {
        if let Some(ref value) = self.key.value {
            return CipherKey::from_base64(value.expose_secret().as_ref()).map(Some);
        }
        if let Some(ref path) = self.key.import_path {
            return CipherKey::load_from(path).map(Some);
        }
        Ok(None)
    }

    /// Build the request list, giving decrypt requests `job_key` unless they
    /// name their own key file
    ///
    /// A column read from disk as `bytes` holds ciphertext, so its declared
    /// type says nothing about the plaintext. Decrypt requests on such a column
    /// without an explicit `target_type` yield strings.
    pub fn requests(&self, job_key: &CipherKey) -> Result<Vec<TransformRequest>> {
        self.transforms
            .iter()
            .map(|spec| {
                let mut request = spec.to_request(job_key)?;
                let is_decrypt = matches!(
                    request.kind.parse::<TransformKind>(),
                    Ok(TransformKind::Decrypt)
                );
                if is_decrypt
                    && request.target_type.is_none()
                    && self.column_type(&spec.column) == ColumnType::Bytes
                {
                    request.target_type = Some(ColumnType::String);
                }
                Ok(request)
            })
            .collect()
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (report only, write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Input table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV file to read
    pub path: PathBuf,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl InputConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("input.path cannot be empty".to_string());
        }
        if !self.delimiter.is_ascii() || self.delimiter == '"' {
            return Err(format!(
                "input.delimiter must be a single ASCII character other than '\"', got '{}'",
                self.delimiter
            ));
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// CSV file to write the scrubbed table to
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// JSON report file
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

/// Encryption key configuration
///
/// At most one of `value` and `import_path` may be set. Without either, a
/// fresh key is generated for the run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeyConfig {
    /// Base64-encoded key
    #[serde(default)]
    pub value: Option<SecretString>,

    /// File holding the raw key bytes
    #[serde(default)]
    pub import_path: Option<PathBuf>,

    /// Where to write the key used for the run
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

impl KeyConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.value.is_some() && self.import_path.is_some() {
            return Err("key.value and key.import_path are mutually exclusive".to_string());
        }
        if let Some(ref value) = self.value {
            if value.expose_secret().is_empty() {
                return Err("key.value cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

/// Synthetic value generation settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SynthesizeConfig {
    /// Seed for reproducible output; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Redaction settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RedactionConfig {
    /// Custom pattern library replacing the built-in one
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,
}

/// One `[[transforms]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformSpec {
    /// Column to transform
    pub column: String,

    /// Transform kind name
    pub kind: String,

    /// Synthesize category
    #[serde(default)]
    pub category: Option<String>,

    /// Truncate count
    #[serde(default)]
    pub count: Option<usize>,

    /// Truncate from the end
    #[serde(default = "default_true")]
    pub from_end: bool,

    /// Decrypt with the key in this file instead of the job key
    #[serde(default)]
    pub key_file: Option<PathBuf>,

    /// Decrypt cast target
    #[serde(default)]
    pub target_type: Option<ColumnType>,
}

impl TransformSpec {
    /// Convert to a request
    pub fn to_request(&self, job_key: &CipherKey) -> Result<TransformRequest> {
        let key = match self.key_file {
            Some(ref path) => CipherKey::load_from(path)?,
            None => job_key.clone(),
        };

        let mut request = TransformRequest::new(&self.column, &self.kind).with_key(key);
        request.category = self.category.clone();
        request.count = self.count;
        request.from_end = self.from_end;
        request.target_type = self.target_type;
        Ok(request)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_delimiter() -> char {
    ','
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
