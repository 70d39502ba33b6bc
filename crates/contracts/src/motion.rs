//! Movement categories and the fixed recording -> category routing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{BodySide, SensorPosition, SensorRole};

/// Joint movement measured by the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementCategory {
    Flexion,
    Extension,
    Abduction,
    Adduction,
    ExternalRotation,
    InternalRotation,
}

impl MovementCategory {
    /// Output order of the report
    pub const ALL: [MovementCategory; 6] = [
        Self::Flexion,
        Self::Extension,
        Self::Abduction,
        Self::Adduction,
        Self::ExternalRotation,
        Self::InternalRotation,
    ];

    /// Position in `ALL`
    pub fn index(self) -> usize {
        match self {
            Self::Flexion => 0,
            Self::Extension => 1,
            Self::Abduction => 2,
            Self::Adduction => 3,
            Self::ExternalRotation => 4,
            Self::InternalRotation => 5,
        }
    }

    /// Sensor position whose roll angle feeds this category.
    ///
    /// Paired categories read the same sensor.
    pub fn source_position(self) -> SensorPosition {
        match self {
            Self::Flexion | Self::Extension => SensorPosition::One,
            Self::Abduction | Self::Adduction => SensorPosition::Two,
            Self::ExternalRotation | Self::InternalRotation => SensorPosition::Three,
        }
    }

    /// Role read for one side of this category
    pub fn source_role(self, side: BodySide) -> SensorRole {
        SensorRole::new(side, self.source_position())
    }

    /// Clinical reference range in degrees
    pub fn clinical_standard(self) -> f64 {
        match self {
            Self::Flexion => 125.0,
            Self::Extension => 20.0,
            Self::Abduction => 45.0,
            Self::Adduction => 30.0,
            Self::ExternalRotation => 30.0,
            Self::InternalRotation => 10.0,
        }
    }

    /// Chinese movement name used in report labels
    pub fn label(self) -> &'static str {
        match self {
            Self::Flexion => "前屈",
            Self::Extension => "后伸",
            Self::Abduction => "外展",
            Self::Adduction => "内收",
            Self::ExternalRotation => "外旋",
            Self::InternalRotation => "内旋",
        }
    }
}

impl fmt::Display for MovementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flexion => "flexion",
            Self::Extension => "extension",
            Self::Abduction => "abduction",
            Self::Adduction => "adduction",
            Self::ExternalRotation => "external_rotation",
            Self::InternalRotation => "internal_rotation",
        };
        f.write_str(name)
    }
}

/// One of the four recordings of a session.
///
/// Each recording feeds a fixed, disjoint set of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingSlot {
    Flexion,
    Extension,
    Abduction,
    Rotation,
}

impl RecordingSlot {
    /// Input order
    pub const ALL: [RecordingSlot; 4] = [
        Self::Flexion,
        Self::Extension,
        Self::Abduction,
        Self::Rotation,
    ];

    /// 1-based file number used in messages
    pub fn number(self) -> u8 {
        match self {
            Self::Flexion => 1,
            Self::Extension => 2,
            Self::Abduction => 3,
            Self::Rotation => 4,
        }
    }

    /// Categories accumulated from this recording
    pub fn categories(self) -> &'static [MovementCategory] {
        match self {
            Self::Flexion => &[MovementCategory::Flexion],
            Self::Extension => &[MovementCategory::Extension],
            Self::Abduction => &[MovementCategory::Abduction, MovementCategory::Adduction],
            Self::Rotation => &[
                MovementCategory::ExternalRotation,
                MovementCategory::InternalRotation,
            ],
        }
    }
}

impl fmt::Display for RecordingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
