//! Record-level read failures, converted into `ContractError::CsvValidation`.

use std::num::ParseFloatError;

use contracts::{ContractError, RecordingSlot};
use thiserror::Error;

/// Failure while reading one 13-token record
#[derive(Debug, Error)]
pub enum RecordError {
    /// Input ended in the middle of a record
    #[error("missing token: input ended while reading column '{field}' of row {row}")]
    MissingToken {
        /// Column being read
        field: &'static str,
        /// 1-based data row
        row: usize,
    },

    /// A numeric column held a non-numeric token
    #[error("unexpected token type: column '{field}' of row {row} expected a number, found '{token}'")]
    UnexpectedTokenType {
        /// Column being read
        field: &'static str,
        /// 1-based data row
        row: usize,
        /// Offending token
        token: String,
        /// Float parser failure; None when the token is outside the numeral grammar
        #[source]
        source: Option<ParseFloatError>,
    },
}

impl RecordError {
    /// Wrap into the unified validation error, keeping this error as the source
    pub fn into_contract_error(self, slot: RecordingSlot) -> ContractError {
        let message = match &self {
            Self::MissingToken { .. } => format!(
                "CSV file {slot}: content incomplete, a column or row is missing"
            ),
            Self::UnexpectedTokenType { .. } => format!(
                "CSV file {slot}: content malformed, unexpected token type where a number was expected"
            ),
        };
        ContractError::csv_validation_with_source(message, self)
    }
}
