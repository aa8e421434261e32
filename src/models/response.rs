//! 通用 API 响应模型
//!
//! 客户端错误返回 `{ "error": ... }`，服务端错误返回 RFC 7807 Problem

use serde::{Deserialize, Serialize};

/// Problem 响应的 Content-Type
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// 客户端错误响应（400）
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// RFC 7807 Problem Details
///
/// 字段说明：
/// - type: 问题类型 URI，未细分时为 about:blank
/// - title: 简短描述
/// - status: HTTP 状态码
/// - detail: 具体错误信息
#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ProblemDetails {
    pub fn new(status: u16, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }
}

/// 首页使用说明
#[derive(Debug, Serialize, Deserialize)]
pub struct UsageInfo {
    pub message: String,
    pub usage: String,
    pub example: String,
}
