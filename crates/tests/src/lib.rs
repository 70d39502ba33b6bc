//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试 (报告键名与顺序)
//! - 解析 -> 对齐 -> 分析 的 e2e 测试
//! - 调用隔离与并发测试

/// 测试用 CSV 生成
#[cfg(test)]
mod fixtures {
    pub const HEADER: &str =
        "日期,时间,设备,名称,加速度X,加速度Y,加速度Z,角速度X,角速度Y,角速度Z,角度X,角度Y\r\n";
    pub const NAMES: [&str; 6] = ["WTL1", "WTL2", "WTL3", "WTR1", "WTR2", "WTR3"];

    /// 六个等长数据块，`roll(role, t)` 给出每行的 roll 角
    pub fn recording(block: usize, roll: impl Fn(usize, usize) -> f64) -> String {
        let mut out = HEADER.to_string();
        for (role, name) in NAMES.iter().enumerate() {
            for t in 0..block {
                out.push_str(&format!(
                    "2024-05-01,10:{:02}:{:02}.000,WT5300000{role},{name},0.01,-0.02,0.98,0.1,0.2,0.3,{},1.5,-2.5\r\n",
                    t / 60,
                    t % 60,
                    roll(role, t)
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod contract_tests {
    use contracts::{MetricKey, MetricKind, RangeOfMotionReport};

    const LABELS: [&str; 24] = [
        "左前屈", "右前屈", "左后伸", "右后伸", "左外展", "右外展", "左内收", "右内收", "左外旋",
        "右外旋", "左内旋", "右内旋", "左前屈差值", "右前屈差值", "左后伸差值", "右后伸差值",
        "左外展差值", "右外展差值", "左内收差值", "右内收差值", "左外旋差值", "右外旋差值",
        "左内旋差值", "右内旋差值",
    ];

    #[test]
    fn test_report_labels_snapshot() {
        let report = RangeOfMotionReport::from_absolutes(|_, _| 0.0);
        let labels: Vec<&str> = report.labels().collect();
        assert_eq!(labels, LABELS);
    }

    #[test]
    fn test_ordered_keys_match_labels() {
        let keys: Vec<String> = MetricKey::ordered(MetricKind::Absolute)
            .chain(MetricKey::ordered(MetricKind::Deviation))
            .map(|k| k.label())
            .collect();
        assert_eq!(keys, LABELS);
    }

    #[test]
    fn test_report_json_snapshot() {
        let report = RangeOfMotionReport::from_absolutes(|category, _| {
            category.clinical_standard()
        });
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.starts_with(r#"{"左前屈":125.0,"右前屈":125.0,"左后伸":20.0"#), "got: {json}");
        assert!(json.ends_with(r#""左内旋差值":0.0,"右内旋差值":0.0}"#), "got: {json}");
    }
}

#[cfg(test)]
mod e2e_tests {
    use contracts::{AlignmentPolicy, AnalysisConfig, ContractError, RecordingSlot};
    use motion_engine::{analyze, MotionEngine};
    use sync_engine::StreamAligner;

    use crate::fixtures::{recording, HEADER};

    /// End-to-end test: CSV -> parse -> align -> extract -> aggregate
    ///
    /// 每个角色 40 行，roll = 基准 + t * 步长。
    /// 40 个值时 delta = 2：high = v[38] - v[20]，low = v[20] - v[2]。
    #[test]
    fn test_e2e_hand_computed() {
        // 步长按角色区分，使各指标结果不同
        let step = [1.0, 0.5, 2.0, 0.25, 4.0, 1.5];
        let file = recording(40, |role, t| -30.0 + step[role] * t as f64);
        let report = analyze([&file, &file, &file, &file], &AnalysisConfig::default()).unwrap();

        let high = |s: f64| s * 38.0 - s * 20.0;
        let low = |s: f64| s * 20.0 - s * 2.0;
        // 左/右 1 号位：前屈、后伸
        assert_eq!(report.get("左前屈"), Some(low(step[0]) + 90.0));
        assert_eq!(report.get("右前屈"), Some(low(step[3]) + 90.0));
        assert_eq!(report.get("左后伸"), Some(high(step[0])));
        assert_eq!(report.get("右后伸"), Some(high(step[3])));
        // 2 号位：外展、内收
        assert_eq!(report.get("左外展"), Some(high(step[1]) * 1.1));
        assert_eq!(report.get("右内收"), Some(low(step[4]) * 1.5));
        // 3 号位：旋转
        assert_eq!(report.get("左外旋"), Some(high(step[2]) * 1.5));
        assert_eq!(report.get("右外旋"), Some(low(step[5]) * 1.5));
        assert_eq!(report.get("左内旋"), Some(low(step[2]) * 1.1));
        assert_eq!(report.get("右内旋"), Some(high(step[5]) * 1.1));

        let data = report.to_report_data();
        assert_eq!(data.motion_amplitude.len(), 12);
        assert_eq!(data.difference[3], high(step[3]) - 20.0);
    }

    #[test]
    fn test_e2e_sample_count_and_alignment() {
        let file = recording(7, |role, t| (role * 100 + t) as f64);
        let tokens = ingestion::tokenize(&file).count();
        let samples = ingestion::parse_recording(RecordingSlot::Flexion, &file).unwrap();
        assert_eq!(samples.len(), (tokens - ingestion::HEADER_TOKENS) / ingestion::RECORD_TOKENS);

        let stream = StreamAligner::default()
            .align(RecordingSlot::Flexion, &samples)
            .unwrap();
        assert_eq!(stream.rem(), 7);
        for (i, role) in contracts::SensorRole::ALL.iter().enumerate() {
            assert_eq!(stream.offsets().offset(*role), i * 7);
        }
        let last = stream.timestep(6).unwrap();
        assert_eq!(last.roll(contracts::SensorRole::ALL[5]), 506.0);
    }

    #[test]
    fn test_e2e_errors_propagate_unchanged() {
        let good = recording(2, |_, _| 0.0);
        let bad = format!("{HEADER}2024-05-01,10:00,dev,WTL1,0,0,0,0,0,0,not-a-number,0,0\r\n");

        let err = analyze([&good, &good, &bad, &good], &AnalysisConfig::default()).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("CSV file 3"), "got: {err}");

        let err = analyze([HEADER, HEADER, HEADER, HEADER], &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, ContractError::CsvValidation { .. }));
    }

    #[test]
    fn test_e2e_short_trailing_block() {
        // 最后一块比第一块短：对齐越界
        let mut file = recording(3, |_, _| 0.0);
        let cut = file.trim_end().rfind('\n').unwrap();
        file.truncate(cut + 1);

        let err = analyze([&file, &file, &file, &file], &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, ContractError::AlignmentOutOfRange { .. }), "got: {err}");
    }

    #[test]
    fn test_e2e_isolation_between_engines_and_calls() {
        let a = recording(40, |role, t| (role + t) as f64);
        let b = recording(20, |_, t| (t * t) as f64);
        let strict = MotionEngine::new(AnalysisConfig {
            alignment_policy: AlignmentPolicy::Strict,
        });

        let solo_b = strict.analyze([&b, &b, &b, &b]).unwrap();
        let _ = strict.analyze([&a, &a, &a, &a]).unwrap();
        let again_b = strict.analyze([&b, &b, &b, &b]).unwrap();
        assert_eq!(solo_b, again_b);
    }

    /// 多个线程同时分析不同输入，结果与单独调用一致
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_e2e_concurrent_invocations() {
        let inputs: Vec<String> = (1..=8)
            .map(|k| recording(20 + k, move |role, t| (role * k + t * k) as f64))
            .collect();

        let expected: Vec<_> = inputs
            .iter()
            .map(|f| analyze([f, f, f, f], &AnalysisConfig::default()).unwrap())
            .collect();

        let handles: Vec<_> = inputs
            .into_iter()
            .map(|f| {
                tokio::task::spawn_blocking(move || {
                    analyze([&f, &f, &f, &f], &AnalysisConfig::default())
                })
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(expected) {
            let report = handle.await.unwrap().unwrap();
            assert_eq!(report, expected);
        }
    }
}

#[cfg(test)]
mod config_tests {
    use config_loader::ConfigLoader;
    use contracts::{RecordingSlot, SessionBlueprint};
    use motion_engine::MotionEngine;

    use crate::fixtures::recording;

    /// 会话文件 -> 读取四个记录 -> 分析
    #[test]
    fn test_session_file_drives_analysis() {
        let dir = tempfile::tempdir().unwrap();
        for (i, name) in ["flex", "ext", "abd", "rot"].iter().enumerate() {
            let file = recording(25, move |role, t| (role * 3 + t * (i + 1)) as f64);
            std::fs::write(dir.path().join(format!("{name}.csv")), file).unwrap();
        }
        let session = dir.path().join("session.json");
        std::fs::write(
            &session,
            r#"{
                "inputs": {
                    "flexion": "flex.csv",
                    "extension": "ext.csv",
                    "abduction": "abd.csv",
                    "rotation": "rot.csv"
                },
                "analysis": { "alignment_policy": "strict" }
            }"#,
        )
        .unwrap();

        let blueprint: SessionBlueprint = ConfigLoader::load_from_path(&session).unwrap();
        let texts = RecordingSlot::ALL
            .map(|slot| std::fs::read_to_string(blueprint.inputs.path(slot)).unwrap());
        let blobs = texts.each_ref().map(String::as_str);

        let report = MotionEngine::new(blueprint.analysis.clone())
            .analyze(blobs)
            .unwrap();
        assert_eq!(report.len(), 24);
        // 每个记录独立缩放，后伸 (文件 2) 与前屈 (文件 1) 结果不同
        assert_ne!(report.get("左前屈").map(|v| v - 90.0), report.get("左后伸"));
    }
}
