//! 日内行情汇总服务
//!
//! 从 Alpha Vantage 拉取 15 分钟 K 线，按自然日汇总最高价均值、最低价均值和成交量
//!
//! ## 处理流程
//! 1. 构造请求 URL（symbol + apikey）
//! 2. 单次 GET 请求上游（超时可配置，不重试）
//! 3. 检查 Note / Error Message
//! 4. 定位 "Time Series (15min)" 字段
//! 5. 逐条解析并按日累加
//! 6. 计算均值，按日期倒序输出

mod aggregate;
mod alpha_vantage;
mod common;
mod error;

pub use aggregate::summarize_response;
pub use alpha_vantage::{build_intraday_url, AlphaVantageClient, IntradaySource};
pub use error::IntradayError;

use crate::config::UpstreamConfig;
use crate::models::DailySummary;

/// 获取指定股票的按日汇总
///
/// 代码为空时直接返回错误，不请求上游
pub async fn get_daily_summaries(
    source: &dyn IntradaySource,
    config: &UpstreamConfig,
    symbol: &str,
) -> Result<Vec<DailySummary>, IntradayError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(IntradayError::MissingSymbol);
    }

    let api_key = config.api_key().ok_or_else(|| {
        log::error!("未配置上游 API Key");
        IntradayError::MissingApiKey
    })?;

    let url = build_intraday_url(&config.base_url, symbol, api_key);
    log::info!("📡 请求日内行情 symbol={} upstream={}", symbol, config.base_url);

    let body = source.fetch(&url).await.map_err(|e| {
        log::warn!("请求上游失败 symbol={}: {}", symbol, e);
        e
    })?;

    let summaries = summarize_response(&body).map_err(|e| {
        log::warn!("上游响应不可用 symbol={}: {}", symbol, e);
        e
    })?;

    log::info!("symbol={} 汇总完成，共 {} 天", symbol, summaries.len());
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 返回固定响应并记录请求 URL
    struct StubSource {
        response: Result<String, IntradayError>,
        requests: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn new(response: Result<String, IntradayError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IntradaySource for StubSource {
        async fn fetch(&self, url: &str) -> Result<String, IntradayError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.response.clone()
        }
    }

    fn config_with_key() -> UpstreamConfig {
        UpstreamConfig {
            api_key: Some("demo".to_string()),
            base_url: "http://upstream.test/query".to_string(),
            ..UpstreamConfig::default()
        }
    }

    #[tokio::test]
    async fn test_success_pipeline() {
        let source = StubSource::new(Ok(r#"{
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (15min)": {
                "2024-01-03 09:30:00": {"2. high": "5", "3. low": "4", "5. volume": "10"},
                "2024-01-02 09:30:00": {"2. high": "10.0", "3. low": "9.0", "5. volume": "100"},
                "2024-01-02 09:45:00": {"2. high": "12.0", "3. low": "8.0", "5. volume": "200"}
            }
        }"#
        .to_string()));

        let result = get_daily_summaries(&source, &config_with_key(), " IBM ").await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].day, "2024-01-03");
        assert_eq!(result[1].day, "2024-01-02");
        assert_eq!(result[1].high_average, 11.0);
        assert_eq!(result[1].low_average, 8.5);
        assert_eq!(result[1].volume, 300);

        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("http://upstream.test/query?"));
        assert!(requests[0].contains("symbol=IBM&"));
        assert!(requests[0].contains("apikey=demo&"));
    }

    #[tokio::test]
    async fn test_blank_symbol_skips_upstream() {
        let source = StubSource::new(Ok("{}".to_string()));
        for symbol in ["", "   ", "\t"] {
            let result = get_daily_summaries(&source, &config_with_key(), symbol).await;
            assert_eq!(result, Err(IntradayError::MissingSymbol));
        }
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let source = StubSource::new(Ok("{}".to_string()));
        let config = UpstreamConfig::default();
        let result = get_daily_summaries(&source, &config, "IBM").await;
        assert_eq!(result, Err(IntradayError::MissingApiKey));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let source = StubSource::new(Err(IntradayError::Transport("operation timed out".into())));
        let result = get_daily_summaries(&source, &config_with_key(), "IBM").await;
        assert_eq!(result, Err(IntradayError::Transport("operation timed out".into())));
    }

    #[tokio::test]
    async fn test_upstream_sentinels() {
        let source = StubSource::new(Ok(r#"{"Error Message": "Invalid API call"}"#.to_string()));
        let result = get_daily_summaries(&source, &config_with_key(), "IBM").await;
        assert_eq!(result, Err(IntradayError::UpstreamClient("Invalid API call".into())));

        let source = StubSource::new(Ok(r#"{"Note": "Thank you for using Alpha Vantage!"}"#.to_string()));
        let result = get_daily_summaries(&source, &config_with_key(), "IBM").await;
        assert_eq!(
            result,
            Err(IntradayError::UpstreamAdvisory("Thank you for using Alpha Vantage!".into()))
        );
    }
}
