//! 日内行情汇总服务
//!
//! 从 Alpha Vantage 获取 15 分钟 K 线，按日返回最高价均值、最低价均值和总成交量

mod config;     // 配置加载
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::services::intraday::AlphaVantageClient;

/// 应用程序入口
///
/// 启动 HTTP 服务器，默认监听 0.0.0.0:8080
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let (config, notes) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    for (level, note) in &notes {
        log::log!(*level, "{}", note);
    }

    if config.upstream.api_key().is_none() {
        log::warn!("未设置 API Key（{} 或 config.json），请求将返回配置错误", config::API_KEY_ENV);
    }

    let client = AlphaVantageClient::new(&config.upstream).map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState {
        upstream: config.upstream.clone(),
        source: Arc::new(client),
    });

    let bind_addr = config.bind_addr();
    log::info!("启动日内行情汇总服务，监听 {}", bind_addr);

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(state.clone())
            .configure(handlers::config)  // 配置路由
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await
}
