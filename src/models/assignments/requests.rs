use serde::Deserialize;

use super::entities::{AssignmentState, Grade};
use crate::errors::{GradingError, Result};

/// 评分请求体（来自 HTTP 请求）
///
/// 字段均为可选，缺失字段由 [`GradeAssignmentRequest::validate`] 统一报告。
/// 多余字段会被忽略。
#[derive(Debug, Deserialize)]
pub struct GradeAssignmentRequest {
    pub id: Option<i64>,
    pub grade: Option<String>,
}

/// 校验通过的评分请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedGrade {
    pub id: i64,
    pub grade: Grade,
}

impl GradeAssignmentRequest {
    pub fn validate(self) -> Result<ValidatedGrade> {
        let mut errors = Vec::new();

        if self.id.is_none() {
            errors.push("id: Missing data for required field.".to_string());
        }

        let grade = match self.grade.as_deref() {
            None => {
                errors.push("grade: Missing data for required field.".to_string());
                None
            }
            Some(raw) => match raw.parse::<Grade>() {
                Ok(grade) => Some(grade),
                Err(_) => {
                    errors.push("grade: Must be one of: A, B, C, D.".to_string());
                    None
                }
            },
        };

        match (self.id, grade) {
            (Some(id), Some(grade)) if errors.is_empty() => Ok(ValidatedGrade { id, grade }),
            _ => Err(GradingError::validation(errors.join("; "))),
        }
    }
}

// 作业列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    /// 为空表示不过滤状态
    pub states: Vec<AssignmentState>,
    pub teacher_id: Option<String>,
}

impl AssignmentListQuery {
    pub fn reviewable() -> Self {
        Self {
            states: AssignmentState::reviewable_states().to_vec(),
            teacher_id: None,
        }
    }

    pub fn for_teacher(teacher_id: impl Into<String>) -> Self {
        Self {
            states: Vec::new(),
            teacher_id: Some(teacher_id.into()),
        }
    }
}
