//! 身份主体存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::Principals;
use crate::entity::principals::Column;
use crate::errors::{GradingError, Result};
use crate::models::principals::entities::Principal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    /// 通过 ID 与用户 ID 查询身份主体
    pub async fn find_principal_impl(&self, id: &str, user_id: &str) -> Result<Option<Principal>> {
        let result = Principals::find()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询身份主体失败: {e}")))?;

        Ok(result.map(|m| m.into_principal()))
    }

    /// 通过 ID 查询身份主体
    pub async fn find_principal_by_id_impl(&self, id: &str) -> Result<Option<Principal>> {
        let result = Principals::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询身份主体失败: {e}")))?;

        Ok(result.map(|m| m.into_principal()))
    }
}
