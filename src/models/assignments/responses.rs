use serde::Serialize;

use super::entities::{Assignment, AssignmentState, Grade};

/// 作业概要（校长视角列表）
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssignmentSummary {
    pub id: i64,
    pub content: Option<String>,
    pub state: AssignmentState,
    pub student_id: String,
    pub teacher_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub grade: Option<Grade>,
}

impl From<Assignment> for AssignmentSummary {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            content: a.content,
            state: a.state,
            student_id: a.student_id,
            teacher_id: a.teacher_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
            grade: a.grade,
        }
    }
}

/// 教师名下作业概要
///
/// 只暴露 id、教师与时间戳，不含内容、状态和成绩。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeacherAssignmentSummary {
    pub id: i64,
    pub user_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Assignment> for TeacherAssignmentSummary {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            user_id: a.teacher_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}
