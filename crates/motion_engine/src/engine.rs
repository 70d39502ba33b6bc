//! 分析入口
//!
//! 一次调用：解析四个记录 -> 逐个对齐并累加 -> 聚合为报告。
//! 调用之间不共享任何状态。

use std::time::Instant;

use contracts::{AnalysisConfig, ContractError, RangeOfMotionReport, RecordingSlot, SensorSample};
use observability::{record_analysis_duration_ms, record_analysis_run, record_report_metrics};
use tracing::{info, instrument, warn};

use crate::context::{AccumulatorSummary, AnalysisContext};

/// 活动范围分析引擎
///
/// 只持有配置，可在线程间共享，可重复调用。
#[derive(Debug, Clone, Default)]
pub struct MotionEngine {
    config: AnalysisConfig,
}

impl MotionEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 分析一次会话的四个 CSV 文本 (顺序：前屈、后伸、外展、旋转)
    ///
    /// # Errors
    /// - `CsvValidation`: 表头不完整、数据行残缺、数值无法解析、全部为空
    /// - `MissingRoles`: Strict 策略下记录缺少角色
    /// - `AlignmentOutOfRange`: 某角色的数据块短于对齐长度
    /// - `InsufficientSamples`: 某项指标没有任何对齐样本
    pub fn analyze(&self, blobs: [&str; 4]) -> Result<RangeOfMotionReport, ContractError> {
        self.run(blobs, false).map(|(report, _)| report)
    }

    /// 同 [`analyze`](Self::analyze)，并返回聚合前各累加器的统计摘要
    ///
    /// 解析与对齐只执行一次。
    pub fn analyze_with_summaries(
        &self,
        blobs: [&str; 4],
    ) -> Result<(RangeOfMotionReport, Vec<AccumulatorSummary>), ContractError> {
        self.run(blobs, true)
            .map(|(report, summaries)| (report, summaries.unwrap_or_default()))
    }

    #[instrument(
        name = "motion_analyze",
        skip_all,
        fields(policy = ?self.config.alignment_policy)
    )]
    fn run(
        &self,
        blobs: [&str; 4],
        with_summaries: bool,
    ) -> Result<(RangeOfMotionReport, Option<Vec<AccumulatorSummary>>), ContractError> {
        let started = Instant::now();

        let result = ingestion::parse_recordings(blobs)
            .and_then(|recordings| self.accumulate(&recordings))
            .and_then(|context| {
                let summaries = with_summaries.then(|| context.summaries());
                Ok((context.into_report()?, summaries))
            });

        record_analysis_run(result.is_ok());
        record_analysis_duration_ms(started.elapsed().as_secs_f64() * 1000.0);

        match &result {
            Ok((report, _)) => {
                record_report_metrics(report);
                info!(
                    metrics = report.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "analysis complete"
                );
            }
            Err(e) => warn!(error = %e, "analysis failed"),
        }

        result
    }

    /// 对已解析的记录执行分析
    pub fn analyze_recordings(
        &self,
        recordings: &[Vec<SensorSample>; 4],
    ) -> Result<RangeOfMotionReport, ContractError> {
        self.accumulate(recordings)?.into_report()
    }

    /// 只对齐并累加，不做聚合 (用于诊断输出)
    pub fn accumulate(
        &self,
        recordings: &[Vec<SensorSample>; 4],
    ) -> Result<AnalysisContext, ContractError> {
        let mut context = AnalysisContext::new(self.config.alignment_policy);
        for (slot, samples) in RecordingSlot::ALL.into_iter().zip(recordings) {
            context.process_slot(slot, samples)?;
        }
        Ok(context)
    }
}

/// 使用给定配置执行一次分析
pub fn analyze(
    blobs: [&str; 4],
    config: &AnalysisConfig,
) -> Result<RangeOfMotionReport, ContractError> {
    MotionEngine::new(config.clone()).analyze(blobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::AlignmentPolicy;

    const HEADER: &str = "date,time,id,name,accX,accY,accZ,gyroX,gyroY,gyroZ,roll,pitch\n";
    const NAMES: [&str; 6] = ["WTL1", "WTL2", "WTL3", "WTR1", "WTR2", "WTR3"];

    /// 一个六角色周期，每个角色一行
    fn cycle(rolls: [f64; 6]) -> String {
        let mut out = HEADER.to_string();
        for (name, roll) in NAMES.iter().zip(rolls) {
            out.push_str(&format!(
                "2024-05-01,10:00:00.000,dev0,{name},0,0,9.8,0,0,0,{roll},0,0\n"
            ));
        }
        out
    }

    /// 每个角色 `block` 行，roll 从 `base` 起逐行加 1
    fn blocks(block: usize, base: [f64; 6]) -> String {
        let mut out = HEADER.to_string();
        for (name, start) in NAMES.iter().zip(base) {
            for t in 0..block {
                let roll = start + t as f64;
                out.push_str(&format!(
                    "2024-05-01,10:00:{t:02},dev0,{name},0,0,9.8,0,0,0,{roll},0,0\n"
                ));
            }
        }
        out
    }

    #[test]
    fn test_single_cycle_end_to_end() {
        // 每个累加器只有一个值：两种截尾极差都为 0
        let files = [
            cycle([10.0, 20.0, 30.0, 40.0, 50.0, 60.0]),
            cycle([-5.0, 1.0, 2.0, 3.0, 4.0, 5.0]),
            cycle([0.5, 15.0, 0.0, 0.0, 25.0, 0.0]),
            cycle([0.0, 0.0, 33.0, 0.0, 0.0, -12.0]),
        ];
        let report = analyze(
            [&files[0], &files[1], &files[2], &files[3]],
            &AnalysisConfig::default(),
        )
        .unwrap();

        assert_eq!(report.len(), 24);
        let expected = [
            ("左前屈", 90.0),
            ("右前屈", 90.0),
            ("左后伸", 0.0),
            ("右后伸", 0.0),
            ("左外展", 0.0),
            ("右外展", 0.0),
            ("左内收", 0.0),
            ("右内收", 0.0),
            ("左外旋", 0.0),
            ("右外旋", 0.0),
            ("左内旋", 0.0),
            ("右内旋", 0.0),
            ("左前屈差值", -35.0),
            ("右前屈差值", -35.0),
            ("左后伸差值", -20.0),
            ("右后伸差值", -20.0),
            ("左外展差值", -45.0),
            ("右外展差值", -45.0),
            ("左内收差值", -30.0),
            ("右内收差值", -30.0),
            ("左外旋差值", -30.0),
            ("右外旋差值", -30.0),
            ("左内旋差值", -10.0),
            ("右内旋差值", -10.0),
        ];
        for (entry, (label, value)) in report.iter().zip(expected) {
            assert_eq!(entry.label, label);
            assert_eq!(entry.value, value, "{label}");
        }
    }

    #[test]
    fn test_forty_sample_blocks() {
        // 每块 40 行：high = v[38] - v[20] = 18，low = v[20] - v[2] = 18
        let base = [0.0, 100.0, -50.0, 7.0, 3.5, 1000.0];
        let file = blocks(40, base);
        let report = analyze([&file, &file, &file, &file], &AnalysisConfig::default()).unwrap();

        assert_eq!(report.get("左前屈"), Some(108.0));
        assert_eq!(report.get("右后伸"), Some(18.0));
        assert_eq!(report.get("左外展"), Some(18.0 * 1.1));
        assert_eq!(report.get("右内收"), Some(18.0 * 1.5));
        assert_eq!(report.get("右外旋"), Some(18.0 * 1.5));
        assert_eq!(report.get("左内旋"), Some(18.0 * 1.1));
        assert_eq!(report.get("右内旋差值"), Some(18.0 * 1.1 - 10.0));
    }

    #[test]
    fn test_invocation_isolation() {
        let a = blocks(40, [0.0; 6]);
        let b = cycle([1.0; 6]);
        let engine = MotionEngine::default();

        let first_b = engine.analyze([&b, &b, &b, &b]).unwrap();
        let first_a = engine.analyze([&a, &a, &a, &a]).unwrap();
        let second_b = engine.analyze([&b, &b, &b, &b]).unwrap();
        let second_a = engine.analyze([&a, &a, &a, &a]).unwrap();

        assert_eq!(first_b, second_b);
        assert_eq!(first_a, second_a);
        assert_ne!(first_a, first_b);
        // 若累加器泄漏，b 的单值累加器会变成 41 个值
        assert_eq!(second_b.get("左后伸"), Some(0.0));
    }

    #[test]
    fn test_failed_call_does_not_poison_next() {
        let good = cycle([1.0; 6]);
        let engine = MotionEngine::default();

        assert!(engine.analyze([&good, "a b", &good, &good]).is_err());
        let report = engine.analyze([&good, &good, &good, &good]).unwrap();
        assert_eq!(report.get("左前屈"), Some(90.0));
    }

    #[test]
    fn test_empty_slot_is_insufficient() {
        let good = cycle([1.0; 6]);
        let err = analyze([&good, &good, HEADER, &good], &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, ContractError::InsufficientSamples { .. }), "got: {err}");
    }

    #[test]
    fn test_strict_policy() {
        let good = cycle([1.0; 6]);
        let mut partial = HEADER.to_string();
        partial.push_str("2024-05-01,10:00,dev0,WTL1,0,0,0,0,0,0,1,0,0\n");
        partial.push_str("2024-05-01,10:00,dev0,WTL2,0,0,0,0,0,0,1,0,0\n");

        let strict = AnalysisConfig {
            alignment_policy: AlignmentPolicy::Strict,
        };
        let err = analyze([&good, &good, &good, &partial], &strict).unwrap_err();
        assert!(matches!(err, ContractError::MissingRoles { slot: 4, .. }), "got: {err}");
    }

    #[test]
    fn test_accumulate_exposes_context() {
        let file = blocks(5, [0.0; 6]);
        let recordings = ingestion::parse_recordings([&file, &file, &file, &file]).unwrap();
        let context = MotionEngine::default().accumulate(&recordings).unwrap();

        for slot in RecordingSlot::ALL {
            assert_eq!(context.timesteps(slot), 5);
        }
        let summaries = context.summaries();
        assert_eq!(summaries[0].stats.count, 5);
        assert_eq!(summaries[0].stats.max, 4.0);
    }

    #[test]
    fn test_analyze_with_summaries_matches_separate_steps() {
        let file = blocks(5, [0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
        let blobs = [file.as_str(); 4];
        let engine = MotionEngine::default();

        let (report, summaries) = engine.analyze_with_summaries(blobs).unwrap();
        assert_eq!(report, engine.analyze(blobs).unwrap());

        let recordings = ingestion::parse_recordings(blobs).unwrap();
        let expected = engine.accumulate(&recordings).unwrap().summaries();
        assert_eq!(summaries.len(), 12);
        for (got, want) in summaries.iter().zip(&expected) {
            assert_eq!(got.label, want.label);
            assert_eq!(got.stats, want.stats);
        }
    }

    #[test]
    fn test_analyze_with_summaries_propagates_errors() {
        let good = cycle([1.0; 6]);
        let err = MotionEngine::default()
            .analyze_with_summaries([&good, &good, HEADER, &good])
            .unwrap_err();
        assert!(matches!(err, ContractError::InsufficientSamples { .. }), "got: {err}");
    }
}
