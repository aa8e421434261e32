//! 日内行情数据模型
//!
//! 定义按日汇总的输出结构

use serde::{Deserialize, Serialize};

/// 单日汇总结果
///
/// 由当日所有有效的 15 分钟 K 线计算得出：
/// - lowAverage / highAverage: 均值，保留 6 位小数
/// - volume: 成交量之和（不取平均）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// 日期（YYYY-MM-DD）
    pub day: String,
    /// 平均最低价
    pub low_average: f64,
    /// 平均最高价
    pub high_average: f64,
    /// 总成交量
    pub volume: i64,
}

/// 单条 K 线中解析出的指标
///
/// 三项均存在时该记录才参与汇总
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BarMetrics {
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<i64>,
}

impl BarMetrics {
    /// 三项齐全时返回 (high, low, volume)
    pub fn complete(&self) -> Option<(f64, f64, i64)> {
        Some((self.high?, self.low?, self.volume?))
    }
}
