//! 日内行情接口处理器
//!
//! ## API 列表
//! - GET /api/intraday/{symbol} - 按日汇总 15 分钟 K 线
//!
//! ## 返回
//! - 200: `[{ day, lowAverage, highAverage, volume }]`，按日期倒序
//! - 400: `{ "error": ... }`（代码为空、上游判定参数错误）
//! - 500: RFC 7807 Problem（配置缺失、请求失败、频率限制、无时间序列）

use actix_web::{web, HttpResponse, Result};

use super::AppState;
use crate::models::{ErrorResponse, ProblemDetails, PROBLEM_CONTENT_TYPE};
use crate::services::intraday::{self, IntradayError};

/// 获取按日汇总数据
///
/// GET /api/intraday/{symbol}
pub async fn get_intraday(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let symbol = path.into_inner();

    match intraday::get_daily_summaries(state.source.as_ref(), &state.upstream, &symbol).await {
        Ok(summaries) => Ok(HttpResponse::Ok().json(summaries)),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 将错误分类映射为 HTTP 响应
pub fn error_response(err: &IntradayError) -> HttpResponse {
    let status = err.status_code();
    if err.is_client_error() {
        return HttpResponse::build(status).json(ErrorResponse::new(err.to_string()));
    }

    let problem = ProblemDetails::new(status.as_u16(), err.title(), err.to_string());
    HttpResponse::build(status)
        .content_type(PROBLEM_CONTENT_TYPE)
        .json(problem)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/intraday/{symbol}", web::get().to(get_intraday));
}
