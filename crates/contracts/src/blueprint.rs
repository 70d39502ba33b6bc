//! SessionBlueprint - Config Loader 输出
//!
//! 描述一次分析会话：四个输入记录文件、分析策略、输出格式。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{AnalysisConfig, RecordingSlot};

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 完整的会话配置蓝图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionBlueprint {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// 四个输入记录
    pub inputs: SessionInputs,

    /// 分析引擎设置
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// 输出设置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 输入记录路径，按记录槽位顺序
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInputs {
    /// 文件 1：前屈
    pub flexion: PathBuf,
    /// 文件 2：后伸
    pub extension: PathBuf,
    /// 文件 3：外展/内收
    pub abduction: PathBuf,
    /// 文件 4：外旋/内旋
    pub rotation: PathBuf,
}

impl SessionInputs {
    /// 指定槽位的路径
    pub fn path(&self, slot: RecordingSlot) -> &Path {
        match slot {
            RecordingSlot::Flexion => &self.flexion,
            RecordingSlot::Extension => &self.extension,
            RecordingSlot::Abduction => &self.abduction,
            RecordingSlot::Rotation => &self.rotation,
        }
    }

    /// 按槽位顺序返回全部路径
    pub fn paths(&self) -> [&Path; 4] {
        RecordingSlot::ALL.map(|slot| self.path(slot))
    }

    /// 将相对路径解析为相对于 `base` 的路径
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.flexion,
            &mut self.extension,
            &mut self.abduction,
            &mut self.rotation,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出格式
    #[serde(default)]
    pub format: OutputFormat,

    /// 表格输出的小数位数
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    2
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
