//! Layered error definitions
//!
//! Categorized by source: csv / alignment / statistics / config

use thiserror::Error;

use crate::{MetricKey, SensorRole};

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== CSV Errors =====
    /// Sensor recording failed validation (header, token type, missing token, emptiness)
    #[error("csv validation error: {message}")]
    CsvValidation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ===== Alignment Errors =====
    /// Strict alignment found roles with no block in the recording
    #[error("recording {slot}: sensor roles never observed: {missing:?}")]
    MissingRoles { slot: u8, missing: Vec<SensorRole> },

    /// A role offset plus timestep points past the end of the recording
    #[error(
        "recording {slot}: timestep {timestep} of role {role} needs sample {index}, but only {len} samples exist"
    )]
    AlignmentOutOfRange {
        slot: u8,
        role: SensorRole,
        timestep: usize,
        index: usize,
        len: usize,
    },

    // ===== Statistics Errors =====
    /// No angles were accumulated for a metric
    #[error("no aligned samples accumulated for metric '{metric}'")]
    InsufficientSamples { metric: MetricKey },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create CSV validation error
    pub fn csv_validation(message: impl Into<String>) -> Self {
        Self::CsvValidation {
            message: message.into(),
            source: None,
        }
    }

    /// Create CSV validation error wrapping the originating failure
    pub fn csv_validation_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::CsvValidation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller-supplied CSV content
    ///
    /// Callers map these to a "bad request" style response.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::CsvValidation { .. }
                | Self::MissingRoles { .. }
                | Self::AlignmentOutOfRange { .. }
                | Self::InsufficientSamples { .. }
        )
    }
}
