//! Logging
//!
//! Structured logging through `tracing`, with an optional JSON log file.
//! Cell values are never logged; only column names, kinds and counts.
//!
//! # Example
//!
//! ```no_run
//! use tabscrub::logging::init_logging;
//! use tabscrub::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a transform that was applied to a column
///
/// # Example
///
/// ```no_run
/// use tabscrub::log_transform_applied;
/// use std::time::Duration;
///
/// log_transform_applied!("ssn", "encrypt", 1000, 812, Duration::from_millis(40));
/// ```
#[macro_export]
macro_rules! log_transform_applied {
    ($column:expr, $kind:expr, $rows:expr, $distinct:expr, $duration:expr) => {
        tracing::info!(
            column = %$column,
            kind = %$kind,
            rows = $rows,
            distinct_values = $distinct,
            duration_ms = $duration.as_millis() as u64,
            "Transform applied"
        );
    };
}

/// Log a request the batch skipped
///
/// # Example
///
/// ```no_run
/// use tabscrub::log_request_skipped;
/// use tabscrub::domain::ScrubError;
///
/// let error = ScrubError::UnknownTransformKind("bogus".to_string());
/// log_request_skipped!("ssn", "bogus", &error);
/// ```
#[macro_export]
macro_rules! log_request_skipped {
    ($column:expr, $kind:expr, $error:expr) => {
        tracing::warn!(
            column = %$column,
            kind = %$kind,
            error = %$error,
            "Skipping transform request"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use tabscrub::log_error_with_context;
/// use tabscrub::domain::ScrubError;
///
/// let error = ScrubError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
