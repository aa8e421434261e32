//! 日内 K 线按日汇总
//!
//! 上游响应格式:
//! ```json
//! {
//!   "Meta Data": { ... },
//!   "Time Series (15min)": {
//!     "2024-01-02 09:30:00": { "1. open": "1", "2. high": "10.0", "3. low": "9.0", "5. volume": "100" },
//!     ...
//!   }
//! }
//! ```
//! 或 `{"Note": "..."}` / `{"Error Message": "..."}`

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::common::{
    DAY_FORMAT, ERROR_MESSAGE_FIELD, NOTE_FIELD, TIMESTAMP_FORMAT, TIMESTAMP_LEN,
    TIME_SERIES_PREFIX,
};
use super::error::IntradayError;
use crate::models::{BarMetrics, DailySummary};

/// 单日累加器
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyAccumulator {
    pub high_sum: f64,
    pub low_sum: f64,
    pub volume_sum: i64,
    pub count: u32,
}

impl DailyAccumulator {
    /// 成交量累加溢出时不计入该记录，返回 false
    fn add(&mut self, high: f64, low: f64, volume: i64) -> bool {
        let Some(volume_sum) = self.volume_sum.checked_add(volume) else {
            return false;
        };
        self.high_sum += high;
        self.low_sum += low;
        self.volume_sum = volume_sum;
        self.count += 1;
        true
    }
}

/// 解析上游响应文本并生成按日汇总
pub fn summarize_response(body: &str) -> Result<Vec<DailySummary>, IntradayError> {
    let document: Value = serde_json::from_str(body)?;

    validate_response(&document)?;
    let series = extract_series(&document)?;
    let days = aggregate_daily(series);

    Ok(format_summaries(&days))
}

/// 检查上游返回的提示/错误字段
///
/// Note 优先于 Error Message（上游通常只会返回其中一个）
pub fn validate_response(document: &Value) -> Result<(), IntradayError> {
    if let Some(note) = document.get(NOTE_FIELD).and_then(Value::as_str) {
        return Err(IntradayError::UpstreamAdvisory(note.to_string()));
    }
    if let Some(message) = document.get(ERROR_MESSAGE_FIELD).and_then(Value::as_str) {
        return Err(IntradayError::UpstreamClient(message.to_string()));
    }
    Ok(())
}

/// 按文档顺序查找第一个以 "Time Series" 开头的字段（不区分大小写）
pub fn extract_series(document: &Value) -> Result<&Value, IntradayError> {
    document
        .as_object()
        .and_then(|obj| {
            obj.iter()
                .find(|(key, _)| has_series_prefix(key))
                .map(|(_, value)| value)
        })
        .ok_or(IntradayError::MissingSeries)
}

fn has_series_prefix(key: &str) -> bool {
    key.get(..TIME_SERIES_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(TIME_SERIES_PREFIX))
}

/// 从单条 K 线中提取 high / low / volume
///
/// 字段名转小写后依次匹配 "high"、"low"、"volume"，命中第一个规则后不再检查其余规则。
/// 名称同时包含多个关键字的字段只会计入第一个，上游字段名固定，目前不会出现这种情况。
/// 数值解析失败的字段直接忽略。
pub fn extract_metrics(fields: &Value) -> BarMetrics {
    let mut metrics = BarMetrics::default();
    let Some(fields) = fields.as_object() else {
        return metrics;
    };

    for (name, value) in fields {
        let name = name.to_lowercase();
        if name.contains("high") {
            if let Some(v) = parse_decimal(value) {
                metrics.high = Some(v);
            }
        } else if name.contains("low") {
            if let Some(v) = parse_decimal(value) {
                metrics.low = Some(v);
            }
        } else if name.contains("volume") {
            if let Some(v) = parse_integer(value) {
                metrics.volume = Some(v);
            }
        }
    }

    metrics
}

/// 数值可能是字符串也可能是 JSON 数字
fn parse_decimal(value: &Value) -> Option<f64> {
    let number = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// 解析 "YYYY-MM-DD HH:mm:ss"，按 UTC 处理，取日期部分
///
/// chrono 解析较宽松（允许空白、一位数字段、闰秒），先逐字节校验格式
fn parse_day(timestamp: &str) -> Option<NaiveDate> {
    if !has_timestamp_shape(timestamp) {
        return None;
    }
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.and_utc().date_naive())
}

/// 校验 "YYYY-MM-DD HH:mm:ss" 的固定形状，秒不允许为 60
fn has_timestamp_shape(timestamp: &str) -> bool {
    let bytes = timestamp.as_bytes();
    if bytes.len() != TIMESTAMP_LEN {
        return false;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b' ',
        13 | 16 => *b == b':',
        _ => b.is_ascii_digit(),
    });
    shape_ok && &bytes[17..] != b"60"
}

/// 按日累加
///
/// 时间戳无法解析或指标不全的记录整条跳过
pub fn aggregate_daily(series: &Value) -> BTreeMap<NaiveDate, DailyAccumulator> {
    let mut days: BTreeMap<NaiveDate, DailyAccumulator> = BTreeMap::new();
    let Some(records) = series.as_object() else {
        return days;
    };

    for (timestamp, fields) in records {
        let Some(day) = parse_day(timestamp) else {
            log::debug!("跳过无法解析的时间戳: {}", timestamp);
            continue;
        };
        let Some((high, low, volume)) = extract_metrics(fields).complete() else {
            log::debug!("跳过指标不全的记录: {}", timestamp);
            continue;
        };
        if !days.entry(day).or_default().add(high, low, volume) {
            log::debug!("跳过成交量累加溢出的记录: {}", timestamp);
        }
    }

    days
}

/// 计算均值并按日期倒序输出
pub fn format_summaries(days: &BTreeMap<NaiveDate, DailyAccumulator>) -> Vec<DailySummary> {
    days.iter()
        .rev()
        .filter(|(_, acc)| acc.count > 0)
        .map(|(day, acc)| {
            let count = f64::from(acc.count);
            DailySummary {
                day: day.format(DAY_FORMAT).to_string(),
                low_average: round6(acc.low_sum / count),
                high_average: round6(acc.high_sum / count),
                volume: acc.volume_sum,
            }
        })
        .collect()
}

/// 保留 6 位小数（四舍五入，远离零）
fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
