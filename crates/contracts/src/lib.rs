//! # Contracts
//!
//! Frozen interface contracts shared by the analysis crates.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Data model
//! - `SensorSample`: one parsed CSV row from a body-worn orientation sensor
//! - `SensorRole`: side (L/R) x position (1/2/3), parsed once from the sensor name
//! - `RangeOfMotionReport`: the ordered 24-entry metric map returned to callers

mod analysis_config;
mod blueprint;
mod error;
mod motion;
mod report;
mod sensor;
mod sensor_name;

pub use analysis_config::*;
pub use blueprint::*;
pub use error::*;
pub use motion::*;
pub use report::*;
pub use sensor::*;
pub use sensor_name::SensorName;
