pub mod health;
pub mod intraday;

use std::sync::Arc;

use actix_web::web;

use crate::config::UpstreamConfig;
use crate::services::intraday::IntradaySource;

/// 各 worker 共享的只读状态
pub struct AppState {
    pub upstream: UpstreamConfig,
    pub source: Arc<dyn IntradaySource>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::config).service(
        web::scope("/api")
            .configure(intraday::config)
    );
}
