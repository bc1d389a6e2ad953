//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::Column;
use crate::entity::prelude::Assignments;
use crate::errors::{GradingError, Result};
use crate::models::assignments::{entities::Assignment, requests::AssignmentListQuery};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};

impl SeaOrmStorage {
    /// 通过 ID 获取作业
    pub async fn find_assignment_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 按条件列出作业
    pub async fn list_assignments_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<Vec<Assignment>> {
        let mut select = Assignments::find();

        // 状态筛选
        if !query.states.is_empty() {
            select = select.filter(
                Column::State.is_in(query.states.iter().map(|s| s.as_str()).collect::<Vec<_>>()),
            );
        }

        // 教师筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let assignments = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(assignments.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 保存作业状态与成绩
    ///
    /// 状态、成绩与更新时间在同一事务内写入，且仅当负责教师未被改动时生效。
    pub async fn save_assignment_impl(&self, assignment: &Assignment) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradingError::database_operation(format!("开启事务失败: {e}")))?;

        let owner = match assignment.teacher_id.as_deref() {
            Some(teacher_id) => Column::TeacherId.eq(teacher_id),
            None => Column::TeacherId.is_null(),
        };

        let result = Assignments::update_many()
            .col_expr(Column::State, Expr::value(assignment.state.to_string()))
            .col_expr(
                Column::Grade,
                Expr::value(assignment.grade.map(|g| g.to_string())),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(assignment.id))
            .filter(owner)
            .exec(&txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("更新作业失败: {e}")))?;

        let current = Assignments::find_by_id(assignment.id)
            .one(&txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询作业失败: {e}")))?
            .ok_or_else(|| {
                GradingError::not_found(format!("Assignment {} not found", assignment.id))
            })?;

        // 作业存在但未更新，说明负责教师已变更
        if result.rows_affected == 0 {
            return Err(GradingError::authorization(
                "Unauthorized to grade this assignment",
            ));
        }

        txn.commit()
            .await
            .map_err(|e| GradingError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(current.into_assignment())
    }
}
