//! Command implementations.

mod analyze;
mod inspect;
mod validate;

pub use analyze::run_analyze;
pub use inspect::run_inspect;
pub use validate::run_validate;

use std::path::Path;

use contracts::RecordingSlot;

use crate::error::CliError;

/// Read a recording as text.
///
/// Exported headers are sometimes not UTF-8; only token boundaries matter to
/// the parser, so invalid bytes are replaced rather than rejected.
pub(crate) async fn read_recording(slot: RecordingSlot, path: &Path) -> Result<String, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CliError::input_read(slot, path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
