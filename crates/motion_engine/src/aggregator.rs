//! 统计聚合器
//!
//! 每个 (动作, 侧别) 对应一条 `TrimRule`：先做截尾统计，再按规则换算为
//! 活动范围。差值项由 `RangeOfMotionReport::from_absolutes` 统一派生。

use contracts::{BodySide, ContractError, MetricKey, MovementCategory, RangeOfMotionReport};
use tracing::debug;

use crate::extractor::AngleAccumulators;
use crate::trim::TrimKind;

/// 截尾值到活动范围的换算
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// 原值
    Identity,
    /// 加上固定角度
    Offset(f64),
    /// 乘以系数
    Scale(f64),
}

impl Adjustment {
    #[inline]
    pub fn apply(self, trimmed: f64) -> f64 {
        match self {
            Self::Identity => trimmed,
            Self::Offset(offset) => trimmed + offset,
            Self::Scale(scale) => trimmed * scale,
        }
    }
}

/// 单项指标的计算规则
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRule {
    pub kind: TrimKind,
    pub adjustment: Adjustment,
}

impl TrimRule {
    pub const fn new(kind: TrimKind, adjustment: Adjustment) -> Self {
        Self { kind, adjustment }
    }

    /// 某动作某侧的规则
    ///
    /// 外旋与内旋左右两侧方向相反。
    pub fn for_metric(category: MovementCategory, side: BodySide) -> Self {
        use Adjustment::*;
        use BodySide::*;
        use MovementCategory::*;
        use TrimKind::*;

        match (category, side) {
            (Flexion, _) => Self::new(Low, Offset(90.0)),
            (Extension, _) => Self::new(High, Identity),
            (Abduction, _) => Self::new(High, Scale(1.1)),
            (Adduction, _) => Self::new(Low, Scale(1.5)),
            (ExternalRotation, Left) => Self::new(High, Scale(1.5)),
            (ExternalRotation, Right) => Self::new(Low, Scale(1.5)),
            (InternalRotation, Left) => Self::new(Low, Scale(1.1)),
            (InternalRotation, Right) => Self::new(High, Scale(1.1)),
        }
    }

    /// 对累加器求值，空累加器返回 None。累加器会被原地排序。
    pub fn evaluate(&self, values: &mut [f64]) -> Option<f64> {
        self.kind.apply(values).map(|trimmed| self.adjustment.apply(trimmed))
    }
}

/// 由 12 个累加器计算完整报告
///
/// # Errors
/// 任一累加器为空时返回 `ContractError::InsufficientSamples`。
pub fn aggregate(accumulators: &mut AngleAccumulators) -> Result<RangeOfMotionReport, ContractError> {
    let mut absolutes = [[0.0_f64; 2]; 6];

    for category in MovementCategory::ALL {
        for side in BodySide::ALL {
            let rule = TrimRule::for_metric(category, side);
            let values = accumulators.get_mut(category, side);
            let n = values.len();

            let value = rule
                .evaluate(values)
                .ok_or(ContractError::InsufficientSamples {
                    metric: MetricKey::absolute(category, side),
                })?;

            debug!(
                category = %category,
                side = ?side,
                samples = n,
                value,
                "metric aggregated"
            );
            absolutes[category.index()][side.index()] = value;
        }
    }

    Ok(RangeOfMotionReport::from_absolutes(|category, side| {
        absolutes[category.index()][side.index()]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 每个累加器填入同一组数值
    fn filled(values: &[f64]) -> AngleAccumulators {
        let mut acc = AngleAccumulators::new();
        for category in MovementCategory::ALL {
            for side in BodySide::ALL {
                for &v in values {
                    acc.push(category, side, v);
                }
            }
        }
        acc
    }

    #[test]
    fn test_rules_per_category() {
        // [1..40]: high = low = 18
        let values: Vec<f64> = (1..=40).map(|v| v as f64).collect();
        let report = aggregate(&mut filled(&values)).unwrap();

        assert_eq!(report.get("左前屈"), Some(18.0 + 90.0));
        assert_eq!(report.get("右后伸"), Some(18.0));
        assert_eq!(report.get("左外展"), Some(18.0 * 1.1));
        assert_eq!(report.get("右内收"), Some(18.0 * 1.5));
        assert_eq!(report.get("左外旋"), Some(18.0 * 1.5));
        assert_eq!(report.get("右内旋"), Some(18.0 * 1.1));
        assert_eq!(report.get("左前屈差值"), Some(18.0 + 90.0 - 125.0));
    }

    #[test]
    fn test_rotation_sides_use_opposite_trims() {
        // n = 5 (delta: high 1, low 0) 使高端与低端结果不同
        let values = [0.0, 1.0, 2.0, 10.0, 100.0];
        let report = aggregate(&mut filled(&values)).unwrap();

        let high = 100.0 - 2.0;
        let low = 2.0 - 0.0;
        assert_eq!(report.get("左外旋"), Some(high * 1.5));
        assert_eq!(report.get("右外旋"), Some(low * 1.5));
        assert_eq!(report.get("左内旋"), Some(low * 1.1));
        assert_eq!(report.get("右内旋"), Some(high * 1.1));
    }

    #[test]
    fn test_deviation_for_every_pair() {
        let values = [3.0, -7.5, 12.25, 40.0, 0.5, 9.0, 22.0];
        let report = aggregate(&mut filled(&values)).unwrap();
        assert_eq!(report.len(), RangeOfMotionReport::METRIC_COUNT);

        for category in MovementCategory::ALL {
            for side in BodySide::ALL {
                let abs = report.get_key(MetricKey::absolute(category, side)).unwrap();
                let dev = report.get_key(MetricKey::deviation(category, side)).unwrap();
                assert_eq!(dev, abs - category.clinical_standard());
            }
        }
    }

    #[test]
    fn test_empty_accumulator_is_insufficient() {
        let mut acc = AngleAccumulators::new();
        for category in MovementCategory::ALL {
            if category == MovementCategory::Adduction {
                continue;
            }
            for side in BodySide::ALL {
                acc.push(category, side, 1.0);
            }
        }

        let err = aggregate(&mut acc).unwrap_err();
        match err {
            ContractError::InsufficientSamples { metric } => {
                assert_eq!(metric, MetricKey::absolute(MovementCategory::Adduction, BodySide::Left));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_identity_and_offset() {
        assert_eq!(Adjustment::Identity.apply(-0.0).to_bits(), (-0.0_f64).to_bits());
        assert_eq!(Adjustment::Offset(90.0).apply(1.5), 91.5);
        assert_eq!(Adjustment::Scale(1.5).apply(2.0), 3.0);
    }
}
