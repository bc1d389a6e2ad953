//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub state: String,
    pub student_id: String,
    pub teacher_id: Option<String>,
    pub grade: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, AssignmentState, Grade};
        use chrono::{DateTime, Utc};

        Assignment {
            id: self.id,
            content: self.content,
            state: self
                .state
                .parse::<AssignmentState>()
                .unwrap_or(AssignmentState::Draft),
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            grade: self.grade.and_then(|g| g.parse::<Grade>().ok()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
