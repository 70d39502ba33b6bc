//! 传感器记录解析模块
//!
//! 每个记录：先跳过 12 个表头 token，再循环读取 13 个 token 组成的数据行：
//! `date timestamp id name accX accY accZ gyroX gyroY gyroZ roll pitch yaw`。

use contracts::{
    ContractError, Orientation, RecordingSlot, SensorName, SensorRole, SensorSample, Vector3,
};
use metrics::counter;
use tracing::{debug, trace, warn};

use crate::error::RecordError;
use crate::tokenizer::{tokenize, Tokens};

/// 表头 token 数
pub const HEADER_TOKENS: usize = 12;

/// 每行数据 token 数
pub const RECORD_TOKENS: usize = 13;

/// 解析一次会话的四个记录
///
/// 表头检查按列交错进行：依次检查每个文件的第 1 个 token，再检查第 2 个……
/// 最先缺少 token 的文件报错。随后按文件顺序解析，第一个错误立即返回。
///
/// # Errors
/// 全部返回 `ContractError::CsvValidation`：
/// - 表头不完整
/// - 数值列无法解析 / 数据行中途结束
/// - 四个文件在表头之后都没有数据行
pub fn parse_recordings(blobs: [&str; 4]) -> Result<[Vec<SensorSample>; 4], ContractError> {
    let mut streams = blobs.map(tokenize);

    for _ in 0..HEADER_TOKENS {
        for (slot, tokens) in RecordingSlot::ALL.iter().zip(streams.iter_mut()) {
            if tokens.next().is_none() {
                return Err(header_error(*slot));
            }
        }
    }

    let mut recordings: [Vec<SensorSample>; 4] = Default::default();
    for ((slot, tokens), out) in RecordingSlot::ALL
        .iter()
        .zip(streams)
        .zip(recordings.iter_mut())
    {
        *out = read_samples(*slot, tokens)?;
    }

    if recordings.iter().all(Vec::is_empty) {
        warn!("no data rows after header in any recording");
        return Err(ContractError::csv_validation(
            "no valid data rows in any file (after header)",
        ));
    }

    Ok(recordings)
}

/// 解析单个记录
///
/// 只做本文件的表头与数据行校验；空记录返回空序列。
pub fn parse_recording(
    slot: RecordingSlot,
    blob: &str,
) -> Result<Vec<SensorSample>, ContractError> {
    let mut tokens = tokenize(blob);
    for _ in 0..HEADER_TOKENS {
        if tokens.next().is_none() {
            return Err(header_error(slot));
        }
    }
    read_samples(slot, tokens)
}

fn header_error(slot: RecordingSlot) -> ContractError {
    warn!(slot = %slot, "recording header incomplete");
    ContractError::csv_validation(format!(
        "CSV file {slot}: header incomplete or too few data rows"
    ))
}

/// 读取表头之后的全部数据行
fn read_samples(slot: RecordingSlot, tokens: Tokens<'_>) -> Result<Vec<SensorSample>, ContractError> {
    let mut reader = RecordReader::new(tokens);
    let mut samples = Vec::new();
    let mut unrecognised = 0usize;

    while let Some(sample) = reader
        .next_sample()
        .map_err(|e| e.into_contract_error(slot))?
    {
        if sample.role.is_none() {
            unrecognised += 1;
        }
        samples.push(sample);
    }

    if unrecognised > 0 {
        debug!(
            slot = %slot,
            rows = unrecognised,
            "rows with unrecognised sensor names"
        );
    }

    debug!(slot = %slot, samples = samples.len(), "recording parsed");
    counter!("rom_samples_parsed_total", "slot" => slot.number().to_string())
        .increment(samples.len() as u64);

    Ok(samples)
}

/// 按列读取数据行，同一块中的行共享传感器名称
struct RecordReader<'a> {
    tokens: Tokens<'a>,
    row: usize,
    last_name: Option<(SensorName, Option<SensorRole>)>,
}

impl<'a> RecordReader<'a> {
    fn new(tokens: Tokens<'a>) -> Self {
        Self {
            tokens,
            row: 0,
            last_name: None,
        }
    }

    /// 输入耗尽时返回 None
    fn next_sample(&mut self) -> Result<Option<SensorSample>, RecordError> {
        let Some(date) = self.tokens.next() else {
            return Ok(None);
        };
        self.row += 1;

        let timestamp = self.text("timestamp")?;
        let device_id = self.text("id")?;
        let (name, role) = self.name()?;

        let acceleration = Vector3 {
            x: self.number("accX")?,
            y: self.number("accY")?,
            z: self.number("accZ")?,
        };
        let angular_rate = Vector3 {
            x: self.number("gyroX")?,
            y: self.number("gyroY")?,
            z: self.number("gyroZ")?,
        };
        let orientation = Orientation {
            roll: self.number("roll")?,
            pitch: self.number("pitch")?,
            yaw: self.number("yaw")?,
        };

        trace!(row = self.row, name = %name, "sample parsed");

        Ok(Some(SensorSample {
            date: date.to_string(),
            timestamp: timestamp.to_string(),
            device_id: device_id.to_string(),
            name,
            role,
            acceleration,
            angular_rate,
            orientation,
        }))
    }

    fn text(&mut self, field: &'static str) -> Result<&'a str, RecordError> {
        self.tokens.next().ok_or(RecordError::MissingToken {
            field,
            row: self.row,
        })
    }

    fn number(&mut self, field: &'static str) -> Result<f64, RecordError> {
        let token = self.text(field)?;
        let mismatch = |source| RecordError::UnexpectedTokenType {
            field,
            row: self.row,
            token: token.to_string(),
            source,
        };
        if !is_numeral(token) {
            return Err(mismatch(None));
        }
        token.parse::<f64>().map_err(|e| mismatch(Some(e)))
    }

    fn name(&mut self) -> Result<(SensorName, Option<SensorRole>), RecordError> {
        let token = self.text("name")?;
        if let Some((name, role)) = &self.last_name {
            if name.as_str() == token {
                return Ok((name.clone(), *role));
            }
        }
        let parsed = (SensorName::new(token), SensorRole::from_name(token));
        self.last_name = Some(parsed.clone());
        Ok(parsed)
    }
}

/// 数值 token 文法：可选符号 + 十进制数（可带指数），或恰好 `NaN` / `Infinity`
///
/// `str::parse::<f64>` 还接受 `nan`、`inf`、`infinity` 等任意大小写写法，这里拒绝。
fn is_numeral(token: &str) -> bool {
    let unsigned = token
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(token);
    if matches!(unsigned, "NaN" | "Infinity") {
        return true;
    }

    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mantissa_ok = digits(int) && digits(frac) && !(int.is_empty() && frac.is_empty());
    let exponent_ok = exponent.map_or(true, |e| {
        let e = e.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(e);
        !e.is_empty() && digits(e)
    });
    mantissa_ok && exponent_ok
}
