use actix_web::{HttpRequest, error::JsonPayloadError, web};
use tracing::debug;

use crate::errors::GradingError;

/// JSON 请求体解析失败时返回 400 与统一的错误结构
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload rejected for {}: {}", req.path(), err);

    let message = match &err {
        JsonPayloadError::ContentType => "Request body must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        }
        other => format!("Invalid request body: {other}"),
    };

    GradingError::validation(message).into()
}

/// JSON 提取器配置：请求体大小上限与错误处理器
pub fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler)
}
