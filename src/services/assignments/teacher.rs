use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::errors::GradingError;
use crate::middlewares::RequirePrincipal;
use crate::models::ApiResponse;
use crate::models::assignments::{
    requests::AssignmentListQuery, responses::TeacherAssignmentSummary,
};

/// 列出当前调用者作为教师负责的作业
/// GET /principal/teachers
pub async fn list_teacher_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user_id = RequirePrincipal::extract_user_id(request)
        .ok_or_else(|| GradingError::authentication("Unauthorized"))?;

    let assignments = storage
        .list_assignments(AssignmentListQuery::for_teacher(user_id))
        .await?;

    let items: Vec<TeacherAssignmentSummary> = assignments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(items)))
}
