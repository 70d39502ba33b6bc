//! 截尾极差统计
//!
//! 两个函数都先将累加器升序排序 (`f64::total_cmp`)，再按下标取差：
//!
//! | 函数 | delta | 结果 |
//! |---|---|---|
//! | `high_trim` | `max(1, n / 20)` | `v[n - delta] - v[n / 2]` |
//! | `low_trim` | `n / 20` | `v[n / 2] - v[delta]` |
//!
//! `low_trim` 的 delta 不做下限修正，小样本时可能为 0，两者不对称。
//! 对任意 `n >= 1` 下标都合法；空累加器返回 None。

use serde::{Deserialize, Serialize};

/// 截尾方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimKind {
    /// 中位数到高端 (去掉最高 5%)
    High,
    /// 低端 (去掉最低 5%) 到中位数
    Low,
}

impl TrimKind {
    /// 对累加器执行截尾统计，原地排序
    pub fn apply(self, values: &mut [f64]) -> Option<f64> {
        match self {
            Self::High => high_trim(values),
            Self::Low => low_trim(values),
        }
    }
}

/// 高端截尾极差：`v[n - max(1, n/20)] - v[n/2]`
pub fn high_trim(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f64::total_cmp);

    let n = values.len();
    let delta = (n / 20).max(1);
    Some(values[n - delta] - values[n / 2])
}

/// 低端截尾极差：`v[n/2] - v[n/20]`
pub fn low_trim(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f64::total_cmp);

    let n = values.len();
    let delta = n / 20;
    Some(values[n / 2] - values[delta])
}
