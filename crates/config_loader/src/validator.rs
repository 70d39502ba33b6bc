//! 配置校验模块
//!
//! 校验规则：
//! - 四个输入路径均非空
//! - 四个输入路径互不相同
//! - 输出小数位数不超过 `MAX_PRECISION`

use std::collections::HashSet;

use contracts::{ContractError, RecordingSlot, SessionBlueprint};

/// 表格输出允许的最大小数位数
pub const MAX_PRECISION: usize = 10;

/// 校验 SessionBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    validate_input_paths(blueprint)?;
    validate_distinct_inputs(blueprint)?;
    validate_output(blueprint)?;
    Ok(())
}

/// 校验输入路径非空
fn validate_input_paths(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    for slot in RecordingSlot::ALL {
        if blueprint.inputs.path(slot).as_os_str().is_empty() {
            return Err(ContractError::config_validation(
                format!("inputs.{}", slot_field(slot)),
                "input path cannot be empty",
            ));
        }
    }
    Ok(())
}

/// 同一记录不能用于两个槽位
fn validate_distinct_inputs(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for slot in RecordingSlot::ALL {
        let path = blueprint.inputs.path(slot);
        if !seen.insert(path) {
            return Err(ContractError::config_validation(
                format!("inputs.{}", slot_field(slot)),
                format!("duplicate input path '{}'", path.display()),
            ));
        }
    }
    Ok(())
}

/// 校验输出配置
fn validate_output(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    let precision = blueprint.output.precision;
    if precision > MAX_PRECISION {
        return Err(ContractError::config_validation(
            "output.precision",
            format!("precision must be <= {MAX_PRECISION}, got {precision}"),
        ));
    }
    Ok(())
}

fn slot_field(slot: RecordingSlot) -> &'static str {
    match slot {
        RecordingSlot::Flexion => "flexion",
        RecordingSlot::Extension => "extension",
        RecordingSlot::Abduction => "abduction",
        RecordingSlot::Rotation => "rotation",
    }
}
