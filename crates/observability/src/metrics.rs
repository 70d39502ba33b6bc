//! 分析指标收集模块
//!
//! 记录每次分析的运行结果、累加器规模与 24 项输出值，
//! 并提供在线统计 (Welford) 供 CLI 输出摘要。

use contracts::{MetricKey, RangeOfMotionReport};
use metrics::{counter, gauge, histogram};

/// 记录一次分析调用的结果
pub fn record_analysis_run(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("rom_analysis_runs_total", "status" => status).increment(1);
}

/// 记录一次分析的耗时
pub fn record_analysis_duration_ms(duration_ms: f64) {
    histogram!("rom_analysis_duration_ms").record(duration_ms);
}

/// 记录某个累加器在聚合前的长度
pub fn record_accumulator_len(key: MetricKey, len: usize) {
    gauge!("rom_accumulator_samples", "metric" => key.label()).set(len as f64);
}

/// 从报告记录 24 项输出值
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_report_metrics;
///
/// let report = engine.analyze(blobs)?;
/// record_report_metrics(&report);
/// ```
pub fn record_report_metrics(report: &RangeOfMotionReport) {
    for entry in report.iter() {
        gauge!("rom_metric_last", "metric" => entry.label.clone()).set(entry.value);
        histogram!("rom_metric_value", "metric" => entry.label.clone()).record(entry.value);
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差 (样本方差，n - 1)
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.max
    }

    /// 摘要快照
    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from(self)
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::default();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}

impl Extend<f64> for RunningStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
