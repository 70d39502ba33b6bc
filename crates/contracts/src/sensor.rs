//! SensorSample - Ingestion 输出
//!
//! 一行传感器记录及其解析后的身体位置标识。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SensorName;

/// 传感器记录中的一行
///
/// 解析后不可变。行顺序即采集顺序，`timestamp` 字段不参与排序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// 采集日期
    pub date: String,

    /// 原始时间戳文本
    pub timestamp: String,

    /// 设备 ID
    pub device_id: String,

    /// 传感器名称 (第 2、3 个字符编码侧别与位置)
    pub name: SensorName,

    /// 解析时确定的角色；名称无法识别时为 None
    pub role: Option<SensorRole>,

    /// 加速度 (x, y, z)
    pub acceleration: Vector3,

    /// 角速度 (x, y, z)
    pub angular_rate: Vector3,

    /// 姿态角 (roll, pitch, yaw)，单位：度
    pub orientation: Orientation,
}

/// 3D 向量
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 姿态角
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// 身体侧别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    Left,
    Right,
}

impl BodySide {
    /// 左侧在前
    pub const ALL: [BodySide; 2] = [BodySide::Left, BodySide::Right];

    fn from_code(code: char) -> Option<Self> {
        match code {
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }

    /// 在 `ALL` 中的下标
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    /// 名称中的编码字符
    pub fn code(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }
}

/// 佩戴位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensorPosition {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl SensorPosition {
    pub const ALL: [SensorPosition; 3] = [Self::One, Self::Two, Self::Three];

    fn from_code(code: char) -> Option<Self> {
        match code {
            '1' => Some(Self::One),
            '2' => Some(Self::Two),
            '3' => Some(Self::Three),
            _ => None,
        }
    }

    /// 名称中的编码字符
    pub fn code(self) -> char {
        match self {
            Self::One => '1',
            Self::Two => '2',
            Self::Three => '3',
        }
    }
}

/// 传感器角色：侧别 x 位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SensorRole {
    pub side: BodySide,
    pub position: SensorPosition,
}

impl SensorRole {
    /// 六个角色，顺序为 L1 L2 L3 R1 R2 R3
    pub const ALL: [SensorRole; 6] = [
        SensorRole::new(BodySide::Left, SensorPosition::One),
        SensorRole::new(BodySide::Left, SensorPosition::Two),
        SensorRole::new(BodySide::Left, SensorPosition::Three),
        SensorRole::new(BodySide::Right, SensorPosition::One),
        SensorRole::new(BodySide::Right, SensorPosition::Two),
        SensorRole::new(BodySide::Right, SensorPosition::Three),
    ];

    pub const fn new(side: BodySide, position: SensorPosition) -> Self {
        Self { side, position }
    }

    /// 从传感器名称解析角色
    ///
    /// 第 2 个字符为侧别 (`L`/`R`)，第 3 个字符为位置 (`1`/`2`/`3`)，
    /// 例如 `"WTL1"` -> Left-1。其余名称返回 None。
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars().skip(2);
        let side = BodySide::from_code(chars.next()?)?;
        let position = SensorPosition::from_code(chars.next()?)?;
        Some(Self::new(side, position))
    }

    /// 在 `ALL` 中的下标
    pub fn index(self) -> usize {
        let side = self.side.index() * 3;
        let position = match self.position {
            SensorPosition::One => 0,
            SensorPosition::Two => 1,
            SensorPosition::Three => 2,
        };
        side + position
    }
}

impl fmt::Display for SensorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.code(), self.position.code())
    }
}
