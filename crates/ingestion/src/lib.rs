//! # Ingestion
//!
//! Sensor recording ingestion module.
//!
//! Responsibilities:
//! - Tokenize raw CSV text (commas and line breaks act as whitespace)
//! - Skip the 12 header tokens of every recording
//! - Parse 13-token records into `SensorSample`
//! - Classify each sample's sensor role once, at parse time
//!
//! ## Usage Example
//!
//! ```
//! use ingestion::parse_recordings;
//!
//! let header = "date,time,id,name,accX,accY,accZ,gyroX,gyroY,gyroZ,roll,pitch\n";
//! let row = "2024-01-01,10:00:00.000,dev0,WTL1,0,0,0,0,0,0,12.5,0,0\n";
//! let blob = format!("{header}{row}");
//!
//! let [flexion, _, _, _] = parse_recordings([blob.as_str(), header, header, header]).unwrap();
//! assert_eq!(flexion.len(), 1);
//! assert_eq!(flexion[0].orientation.roll, 12.5);
//! ```

mod error;
mod parser;
mod tokenizer;

// Re-exports
pub use contracts::SensorSample;
pub use error::RecordError;
pub use parser::{parse_recording, parse_recordings, HEADER_TOKENS, RECORD_TOKENS};
pub use tokenizer::{tokenize, Tokens};
