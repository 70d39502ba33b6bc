//! # Motion Engine
//!
//! 活动范围分析引擎。
//!
//! 输入一次会话的四个 CSV 记录，输出 24 项命名指标：
//! - `extractor`: 按动作类别从对齐时间步中取 roll 角并累加
//! - `trim`: 截尾极差统计 (高端 / 低端)
//! - `aggregator`: 截尾值换算为活动范围并与临床标准求差
//! - `engine`: 单次调用的完整流程，每次调用独立的 `AnalysisContext`
//!
//! ## 使用示例
//!
//! ```ignore
//! use motion_engine::{analyze, AnalysisConfig};
//!
//! let report = analyze([flexion, extension, abduction, rotation], &AnalysisConfig::default())?;
//! println!("{:?}", report.get("左前屈"));
//! ```

pub mod aggregator;
mod context;
mod engine;
pub mod extractor;
pub mod trim;

// Re-exports
pub use aggregator::{aggregate, Adjustment, TrimRule};
pub use context::{AccumulatorSummary, AnalysisContext};
pub use contracts::{AnalysisConfig, RangeOfMotionReport};
pub use engine::{analyze, MotionEngine};
pub use extractor::{extract, AngleAccumulators};
pub use trim::{high_trim, low_trim, TrimKind};
