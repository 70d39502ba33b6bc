//! # Sync Engine
//!
//! 多传感器记录对齐引擎。
//!
//! 一个记录文件是六个传感器依次写出的扁平序列。负责：
//! - 通过名称变化定位每个角色的数据块起点
//! - 以第一个数据块长度 `rem` 作为对齐时间步数
//! - 输出 `rem` 个六元组 `AlignedTimestep`
//!
//! ## 使用示例
//!
//! ```ignore
//! use sync_engine::{AlignmentPolicy, StreamAligner};
//!
//! let aligner = StreamAligner::new(AlignmentPolicy::Lenient);
//! let stream = aligner.align(RecordingSlot::Flexion, &samples)?;
//!
//! for step in stream.timesteps() {
//!     let left = step.roll(SensorRole::new(BodySide::Left, SensorPosition::One));
//! }
//! ```

mod aligner;
mod stream;

// Re-exports
pub use aligner::{RoleOffsets, StreamAligner};
pub use contracts::{AlignmentPolicy, SensorSample};
pub use stream::{AlignedStream, AlignedTimestep};
