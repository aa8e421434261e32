//! 日内汇总错误分类
//!
//! 每个变体对应一种失败场景，由 HTTP 层据此选择状态码和响应格式

use actix_web::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntradayError {
    /// 股票代码为空
    #[error("Symbol is required.")]
    MissingSymbol,

    /// 未配置上游 API Key
    #[error("Upstream API key is not configured.")]
    MissingApiKey,

    /// 请求上游失败（超时、DNS、非 2xx 状态码、响应体读取失败）
    #[error("{0}")]
    Transport(String),

    /// 上游返回的不是合法 JSON
    #[error("Upstream returned invalid JSON: {0}")]
    InvalidPayload(String),

    /// 上游提示信息（通常是频率限制）
    #[error("{0}")]
    UpstreamAdvisory(String),

    /// 上游认为请求参数有误（如代码不存在）
    #[error("{0}")]
    UpstreamClient(String),

    /// 响应中没有 "Time Series" 字段
    #[error("No time series data found in the upstream response.")]
    MissingSeries,
}

impl IntradayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingSymbol | Self::UpstreamClient(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否以 `{ "error": ... }` 形式返回给客户端
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Problem 响应标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingSymbol => "Invalid symbol",
            Self::MissingApiKey => "Configuration error",
            Self::Transport(_) => "Upstream request failed",
            Self::InvalidPayload(_) => "Invalid upstream response",
            Self::UpstreamAdvisory(_) => "Upstream notice",
            Self::UpstreamClient(_) => "Upstream rejected request",
            Self::MissingSeries => "Missing time series",
        }
    }
}

impl From<reqwest::Error> for IntradayError {
    fn from(e: reqwest::Error) -> Self {
        // URL 中带有 apikey，不能出现在返回给客户端的错误信息里
        Self::Transport(e.without_url().to_string())
    }
}

impl From<serde_json::Error> for IntradayError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidPayload(e.to_string())
    }
}
