//! Alpha Vantage 日内行情接口
//!
//! 对接 https://www.alphavantage.co/query?function=TIME_SERIES_INTRADAY

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use url::form_urlencoded;

use super::common::{DATA_TYPE, INTRADAY_FUNCTION, INTRADAY_INTERVAL, OUTPUT_SIZE};
use super::error::IntradayError;
use crate::config::UpstreamConfig;

/// 日内行情数据源
///
/// 返回上游原始响应文本，便于测试时替换为本地数据
#[async_trait]
pub trait IntradaySource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, IntradayError>;
}

/// 构造日内行情请求 URL
///
/// symbol 和 api_key 会做 URL 编码，不校验代码格式（以上游为准）。
/// 空格编码为 %20 而不是 +（原始 + 已被编码为 %2B，剩下的 + 都是空格）
pub fn build_intraday_url(base_url: &str, symbol: &str, api_key: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("function", INTRADAY_FUNCTION)
        .append_pair("symbol", symbol)
        .append_pair("interval", INTRADAY_INTERVAL)
        .append_pair("outputsize", OUTPUT_SIZE)
        .append_pair("apikey", api_key)
        .append_pair("datatype", DATA_TYPE)
        .finish()
        .replace('+', "%20");

    format!("{}?{}", base_url.trim_end_matches('?'), query)
}

/// 基于 reqwest 的上游客户端
///
/// Client 内部带连接池，所有 worker 共享同一个实例
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
}

impl AlphaVantageClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl IntradaySource for AlphaVantageClient {
    /// 单次 GET，不重试；请求 future 被丢弃时上游请求随之取消
    async fn fetch(&self, url: &str) -> Result<String, IntradayError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let text = response.text().await?;

        let preview: String = text.chars().take(200).collect();
        log::debug!("📥 原始响应数据: {}", preview);
        Ok(text)
    }
}
