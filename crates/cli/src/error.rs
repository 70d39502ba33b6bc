//! Error types for CLI operations.

use std::path::PathBuf;
use thiserror::Error;

use contracts::RecordingSlot;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Neither a session file nor the four recordings were given
    #[error("no recordings given: pass --config <session> or all of --flexion/--extension/--abduction/--rotation")]
    MissingInputs,

    /// Session file not found
    #[error("Session file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// A recording could not be read
    #[error("Failed to read recording {slot} from {path}")]
    InputRead {
        slot: RecordingSlot,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Session or recording rejected by loading, parsing or analysis
    #[error(transparent)]
    Contract(#[from] contracts::ContractError),
}

impl CliError {
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn input_read(slot: RecordingSlot, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputRead {
            slot,
            path: path.into(),
            source,
        }
    }
}
