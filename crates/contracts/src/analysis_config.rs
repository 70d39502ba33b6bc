//! Analysis engine configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};

/// Motion engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How the aligner treats roles that never appear in a recording
    #[serde(default)]
    pub alignment_policy: AlignmentPolicy,
}

/// Strategy for roles with no block in a recording
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Keep offset 0 for unobserved roles and log a warning
    #[default]
    Lenient,
    /// Fail the recording if any role is unobserved
    Strict,
}
