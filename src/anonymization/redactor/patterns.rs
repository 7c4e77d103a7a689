//! Pattern library for PII redaction

use crate::anonymization::models::RedactionCategory;
use crate::domain::{Result, ScrubError};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Category label
    pub category: String,
    /// Regex patterns for this category
    pub patterns: Vec<String>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Compiled regex
    pub regex: Regex,
    /// Redaction category
    pub category: RedactionCategory,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: Vec<PatternDefinition>,
}

/// Ordered registry of compiled redaction patterns
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Create a pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScrubError::Configuration(format!(
                "Failed to read pattern library {}: {e}",
                path.display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content)?;

        let mut patterns = Vec::new();

        for def in library.patterns {
            let category: RedactionCategory = def
                .category
                .parse()
                .map_err(ScrubError::Configuration)?;

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    ScrubError::Configuration(format!(
                        "Invalid regex for {}: {pattern_str}: {e}",
                        category.label()
                    ))
                })?;

                patterns.push(CompiledPattern { regex, category });
            }
        }

        if patterns.is_empty() {
            return Err(ScrubError::Configuration(
                "Pattern library defines no patterns".to_string(),
            ));
        }

        Ok(Self { patterns })
    }

    /// Create a pattern registry with the built-in patterns
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../patterns/redaction_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// All patterns, in library order
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }
}
