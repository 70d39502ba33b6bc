//! SensorName - Cheap-to-clone device name carried by every sample row
//!
//! A recording repeats the same name on hundreds of consecutive rows, so the
//! parser shares one `Arc<str>` across a block instead of allocating per row.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Sensor name as written in the recording (e.g. `"WTL1"`).
///
/// # Examples
/// ```
/// use contracts::SensorName;
///
/// let name: SensorName = "WTL1".into();
/// let same = name.clone();
/// assert!(name.shares_storage(&same));
/// assert_eq!(name.as_str(), "WTL1");
/// ```
#[derive(Clone)]
pub struct SensorName(Arc<str>);

impl SensorName {
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether both names share the same allocation.
    #[inline]
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<&str> for SensorName {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for SensorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SensorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SensorName({:?})", self.0)
    }
}

impl PartialEq for SensorName {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // rows of one block share the Arc
        self.shares_storage(other) || self.0 == other.0
    }
}

impl Eq for SensorName {}

impl PartialEq<&str> for SensorName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for SensorName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SensorName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self(Arc::from(s)))
    }
}
