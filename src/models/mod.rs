pub mod assignments;
pub mod common;
pub mod principals;

pub use common::{ApiResponse, ErrorResponse};

use serde::Serialize;

// 程序启动时间，用于计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 就绪检查响应
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub time: chrono::DateTime<chrono::Utc>,
    pub uptime_secs: i64,
}
