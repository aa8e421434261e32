use actix_web::{web, HttpResponse, Result};
use crate::models::UsageInfo;

/// GET / - 使用说明
pub async fn index() -> Result<HttpResponse> {
    let usage = UsageInfo {
        message: "Intraday daily summary service".to_string(),
        usage: "GET /api/intraday/{symbol}".to_string(),
        example: "/api/intraday/IBM".to_string(),
    };
    Ok(HttpResponse::Ok().json(usage))
}

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check));
}
