use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::{requests::AssignmentListQuery, responses::AssignmentSummary};

/// 列出所有已提交或已评分的作业
/// GET /principal/assignments
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let principal = AssignmentService::current_principal(request)?;

    let assignments = storage
        .list_assignments(AssignmentListQuery::reviewable())
        .await?;

    debug!(
        "Principal {} listed {} reviewable assignments",
        principal.id,
        assignments.len()
    );

    let items: Vec<AssignmentSummary> = assignments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(items)))
}
