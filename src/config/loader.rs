//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ScrubConfig;
use crate::config::secret_string;
use crate::domain::{Result, ScrubError};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ScrubConfig
/// 4. Applies environment variable overrides (TABSCRUB_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ScrubError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use tabscrub::config::load_config;
///
/// let config = load_config("tabscrub.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ScrubConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ScrubError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ScrubError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ScrubConfig = toml::from_str(&contents)
        .map_err(|e| ScrubError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| ScrubError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ScrubError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(ScrubError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the TABSCRUB_* prefix
///
/// Variables follow the pattern TABSCRUB_<SECTION>_<KEY>, for example
/// TABSCRUB_INPUT_PATH or TABSCRUB_KEY_VALUE. Unparseable values are ignored.
fn apply_env_overrides(config: &mut ScrubConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("TABSCRUB_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("TABSCRUB_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Input/output overrides
    if let Ok(val) = std::env::var("TABSCRUB_INPUT_PATH") {
        config.input.path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("TABSCRUB_OUTPUT_PATH") {
        config.output.path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("TABSCRUB_OUTPUT_REPORT_PATH") {
        config.output.report_path = Some(PathBuf::from(val));
    }

    // Key overrides
    if let Ok(val) = std::env::var("TABSCRUB_KEY_VALUE") {
        config.key.value = Some(secret_string(val));
        config.key.import_path = None;
    }
    if let Ok(val) = std::env::var("TABSCRUB_KEY_IMPORT_PATH") {
        config.key.import_path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("TABSCRUB_KEY_EXPORT_PATH") {
        config.key.export_path = Some(PathBuf::from(val));
    }

    // Collaborator overrides
    if let Ok(val) = std::env::var("TABSCRUB_SYNTHESIZE_SEED") {
        if let Ok(seed) = val.parse() {
            config.synthesize.seed = Some(seed);
        }
    }
    if let Ok(val) = std::env::var("TABSCRUB_REDACTION_PATTERN_LIBRARY") {
        config.redaction.pattern_library = Some(PathBuf::from(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("TABSCRUB_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TABSCRUB_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
