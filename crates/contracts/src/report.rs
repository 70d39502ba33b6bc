//! RangeOfMotionReport - Motion Engine 输出
//!
//! 24 个命名指标的有序映射。键名与顺序是下游报告存储的外部契约，不可更改。

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::{BodySide, MovementCategory};

/// 指标类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// 实测活动范围
    Absolute,
    /// 实测值减去临床标准值
    Deviation,
}

/// 指标键：动作 x 侧别 x 类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricKey {
    pub category: MovementCategory,
    pub side: BodySide,
    pub kind: MetricKind,
}

impl MetricKey {
    pub const fn new(category: MovementCategory, side: BodySide, kind: MetricKind) -> Self {
        Self {
            category,
            side,
            kind,
        }
    }

    pub const fn absolute(category: MovementCategory, side: BodySide) -> Self {
        Self::new(category, side, MetricKind::Absolute)
    }

    pub const fn deviation(category: MovementCategory, side: BodySide) -> Self {
        Self::new(category, side, MetricKind::Deviation)
    }

    /// 报告中的字面键名，例如 `左前屈`、`右内旋差值`
    pub fn label(&self) -> String {
        let side = match self.side {
            BodySide::Left => "左",
            BodySide::Right => "右",
        };
        let suffix = match self.kind {
            MetricKind::Absolute => "",
            MetricKind::Deviation => "差值",
        };
        format!("{side}{}{suffix}", self.category.label())
    }

    /// 按输出顺序遍历某一类别的全部键 (动作顺序，左先右后)
    pub fn ordered(kind: MetricKind) -> impl Iterator<Item = MetricKey> {
        MovementCategory::ALL.into_iter().flat_map(move |category| {
            BodySide::ALL
                .into_iter()
                .map(move |side| MetricKey::new(category, side, kind))
        })
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// 报告条目
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEntry {
    pub key: MetricKey,
    pub label: String,
    pub value: f64,
}

/// 活动范围报告
///
/// 前 12 项为实测值，后 12 项为与临床标准的差值，均按动作顺序、左先右后排列。
#[derive(Debug, Clone, PartialEq)]
pub struct RangeOfMotionReport {
    entries: Vec<MetricEntry>,
}

impl RangeOfMotionReport {
    /// 指标总数
    pub const METRIC_COUNT: usize = 24;

    /// 由 12 个实测值构建完整报告，差值项自动派生
    pub fn from_absolutes<F>(mut absolute: F) -> Self
    where
        F: FnMut(MovementCategory, BodySide) -> f64,
    {
        let mut entries = Vec::with_capacity(Self::METRIC_COUNT);

        for key in MetricKey::ordered(MetricKind::Absolute) {
            let value = absolute(key.category, key.side);
            entries.push(MetricEntry {
                label: key.label(),
                key,
                value,
            });
        }

        let deviations: Vec<MetricEntry> = entries
            .iter()
            .map(|entry| {
                let key = MetricKey::deviation(entry.key.category, entry.key.side);
                MetricEntry {
                    label: key.label(),
                    key,
                    value: entry.value - entry.key.category.clinical_standard(),
                }
            })
            .collect();
        entries.extend(deviations);

        Self { entries }
    }

    /// 按字面键名查找
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    /// 按键查找
    pub fn get_key(&self, key: MetricKey) -> Option<f64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &MetricEntry> {
        self.entries.iter()
    }

    /// 全部键名 (有序)
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 投影为报告存储使用的三组向量
    pub fn to_report_data(&self) -> ReportData {
        let lookup = |kind: MetricKind| -> Vec<f64> {
            MetricKey::ordered(kind)
                .map(|key| self.get(&key.label()).unwrap_or(0.0))
                .collect()
        };

        ReportData {
            standard_amplitude: MetricKey::ordered(MetricKind::Absolute)
                .map(|key| key.category.clinical_standard())
                .collect(),
            motion_amplitude: lookup(MetricKind::Absolute),
            difference: lookup(MetricKind::Deviation),
        }
    }
}

impl Serialize for RangeOfMotionReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, &entry.value)?;
        }
        map.end()
    }
}

/// 报告数据 (存储协作方使用的格式)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    /// 临床标准值
    pub standard_amplitude: Vec<f64>,
    /// 实测活动范围
    pub motion_amplitude: Vec<f64>,
    /// 差值
    pub difference: Vec<f64>,
}
