//! 公共常量

// ==================== Alpha Vantage 查询参数 ====================

/// 日内时间序列接口
pub const INTRADAY_FUNCTION: &str = "TIME_SERIES_INTRADAY";
/// K 线周期
pub const INTRADAY_INTERVAL: &str = "15min";
/// 返回完整历史（最近一个月）
pub const OUTPUT_SIZE: &str = "full";
/// 返回格式
pub const DATA_TYPE: &str = "json";

// ==================== 响应字段 ====================

/// 频率限制等提示信息
pub const NOTE_FIELD: &str = "Note";
/// 参数错误信息
pub const ERROR_MESSAGE_FIELD: &str = "Error Message";
/// 时间序列字段前缀，如 "Time Series (15min)"
pub const TIME_SERIES_PREFIX: &str = "Time Series";

/// K 线时间戳格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// 时间戳固定长度（零填充）
pub const TIMESTAMP_LEN: usize = 19;
/// 日期输出格式
pub const DAY_FORMAT: &str = "%Y-%m-%d";
