use actix_web::{HttpResponse, web};

use crate::errors::GradingError;
use crate::models::{AppStartTime, ReadinessResponse};

// 就绪检查
pub async fn readiness(start_time: web::Data<AppStartTime>) -> HttpResponse {
    let now = chrono::Utc::now();
    HttpResponse::Ok().json(ReadinessResponse {
        status: "ready",
        time: now,
        uptime_secs: now
            .signed_duration_since(start_time.start_datetime)
            .num_seconds(),
    })
}

// 未匹配路由
pub async fn not_found() -> Result<HttpResponse, GradingError> {
    Err(GradingError::not_found("Not found"))
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(readiness));
}
