use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::errors::{GradingError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{
    entities::{Assignment, AssignmentState},
    requests::GradeAssignmentRequest,
};

/// 检查用户是否为作业的负责教师
pub(crate) fn check_grade_permission(assignment: &Assignment, user_id: &str) -> Result<()> {
    if assignment.is_taught_by(user_id) {
        Ok(())
    } else {
        Err(GradingError::authorization(
            "Unauthorized to grade this assignment",
        ))
    }
}

/// 为作业评分
/// POST /principal/assignments/grade
pub async fn grade_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    payload: GradeAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let principal = AssignmentService::current_principal(request)?;

    let validated = payload.validate()?;

    let mut assignment = storage
        .find_assignment(validated.id)
        .await?
        .ok_or_else(|| GradingError::not_found("Assignment not found"))?;

    // 按 principal_id 重新解析调用者对应的用户
    let grader = storage
        .find_principal_by_id(&principal.id)
        .await?
        .ok_or_else(|| GradingError::authentication("Unauthorized"))?;

    check_grade_permission(&assignment, &grader.user_id)?;

    if assignment.state == AssignmentState::Graded {
        info!(
            "Re-grading assignment {} (previous grade: {:?})",
            assignment.id, assignment.grade
        );
    }

    assignment.mark_graded(validated.grade);
    let graded = storage.save_assignment(&assignment).await?;

    info!(
        "Assignment {} graded {} by user {}",
        graded.id, validated.grade, grader.user_id
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(graded)))
}
