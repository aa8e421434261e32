//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，并允许环境变量覆盖

use log::Level;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Alpha Vantage 查询接口
pub const DEFAULT_UPSTREAM_URL: &str = "https://www.alphavantage.co/query";

/// API Key 环境变量名
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 上游行情接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 上游 API Key（缺失时请求返回配置错误）
    #[serde(default)]
    pub api_key: Option<String>,
    /// 上游接口地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 上游配置
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_base_url() -> String { DEFAULT_UPSTREAM_URL.to_string() }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl UpstreamConfig {
    /// 返回有效的 API Key，空白字符串视为未配置
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值，最后应用环境变量覆盖
    ///
    /// 此时日志系统尚未初始化，加载过程的日志连同级别一起返回，初始化后补打
    pub fn load() -> (Self, Vec<(Level, String)>) {
        let (mut config, notes) = Self::load_from(&["config.json", "config/config.json"]);
        config.apply_overrides(
            env::var(API_KEY_ENV).ok(),
            env::var("PORT").ok(),
        );
        (config, notes)
    }

    /// 按顺序尝试配置文件，返回第一个加载成功的
    pub fn load_from<P: AsRef<Path>>(config_paths: &[P]) -> (Self, Vec<(Level, String)>) {
        let mut notes = Vec::new();

        for path in config_paths {
            let path = path.as_ref();
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        notes.push((Level::Info, format!("从 {} 加载配置成功", path.display())));
                        return (config, notes);
                    }
                    Err(e) => {
                        notes.push((
                            Level::Warn,
                            format!("加载配置文件 {} 失败: {}", path.display(), e),
                        ));
                    }
                }
            }
        }

        notes.push((Level::Info, "使用默认配置".to_string()));
        (Self::default(), notes)
    }

    /// 应用环境变量覆盖
    pub fn apply_overrides(&mut self, api_key: Option<String>, port: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.upstream.api_key = Some(key);
        }
        if let Some(port) = port.and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.upstream.connect_timeout_secs, 10);
        assert!(config.upstream.api_key().is_none());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = AppConfig::from_json(r#"{"upstream": {"api_key": "demo"}, "server": {"port": 9000}}"#)
            .unwrap();
        assert_eq!(config.upstream.api_key(), Some("demo"));
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = AppConfig::from_json(r#"{"upstream": {"api_key": "   "}}"#).unwrap();
        assert!(config.upstream.api_key().is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("secret".to_string()), Some("3000".to_string()));
        assert_eq!(config.upstream.api_key(), Some("secret"));
        assert_eq!(config.server.port, 3000);

        // 空值和非法端口不覆盖
        config.apply_overrides(Some(" ".to_string()), Some("abc".to_string()));
        assert_eq!(config.upstream.api_key(), Some("secret"));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_from_warns_on_bad_file() {
        let dir = std::env::temp_dir().join(format!("intraday-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let bad = dir.join("bad.json");
        let good = dir.join("good.json");
        fs::write(&bad, "{not json").unwrap();
        fs::write(&good, r#"{"server": {"port": 9100}}"#).unwrap();

        let (config, notes) = AppConfig::load_from(&[dir.join("missing.json"), bad, good]);
        assert_eq!(config.server.port, 9100);
        let levels: Vec<Level> = notes.iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec![Level::Warn, Level::Info]);
        assert!(notes[0].1.contains("bad.json"));

        let (config, notes) = AppConfig::load_from(&[dir.join("missing.json")]);
        assert_eq!(config.server.port, 8080);
        assert_eq!(notes, vec![(Level::Info, "使用默认配置".to_string())]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(AppConfig::from_json("{not json").is_err());
    }
}
