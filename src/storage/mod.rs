use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::AssignmentListQuery},
    principals::entities::Principal,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 身份主体方法（只读）
    // 通过 ID 与用户 ID 同时匹配身份主体
    async fn find_principal(&self, id: &str, user_id: &str) -> Result<Option<Principal>>;
    // 通过 ID 获取身份主体
    async fn find_principal_by_id(&self, id: &str) -> Result<Option<Principal>>;

    /// 作业方法
    // 通过 ID 获取作业
    async fn find_assignment(&self, id: i64) -> Result<Option<Assignment>>;
    // 按条件列出作业（按 ID 升序）
    async fn list_assignments(&self, query: AssignmentListQuery) -> Result<Vec<Assignment>>;
    // 原子地保存作业的状态与成绩
    async fn save_assignment(&self, assignment: &Assignment) -> Result<Assignment>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
