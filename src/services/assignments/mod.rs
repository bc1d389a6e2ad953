pub mod grade;
pub mod list;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{GradingError, Result};
use crate::middlewares::RequirePrincipal;
use crate::models::assignments::requests::GradeAssignmentRequest;
use crate::models::principals::entities::Principal;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        if let Some(storage) = &self.storage {
            return Ok(storage.clone());
        }
        request
            .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
            .map(|data| data.get_ref().clone())
            .ok_or_else(|| GradingError::database_config("Storage not found in app data"))
    }

    /// 获取中间件已校验的身份主体
    pub(crate) fn current_principal(request: &HttpRequest) -> Result<Principal> {
        RequirePrincipal::extract_principal(request)
            .ok_or_else(|| GradingError::authentication("Unauthorized"))
    }

    /// 列出已提交或已评分的作业
    pub async fn list_assignments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request).await
    }

    /// 列出当前教师名下的作业
    pub async fn list_teacher_assignments(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teacher::list_teacher_assignments(self, request).await
    }

    /// 评分
    pub async fn grade_assignment(
        &self,
        request: &HttpRequest,
        payload: GradeAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_assignment(self, request, payload).await
    }
}
