use serde::{Deserialize, Serialize};

// 作业状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentState {
    Draft,     // 草稿
    Submitted, // 已提交
    Graded,    // 已评分
}

impl AssignmentState {
    pub const DRAFT: &'static str = "DRAFT";
    pub const SUBMITTED: &'static str = "SUBMITTED";
    pub const GRADED: &'static str = "GRADED";

    /// 校长视角可见的状态
    pub fn reviewable_states() -> &'static [AssignmentState] {
        &[Self::Submitted, Self::Graded]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentState::Draft => Self::DRAFT,
            AssignmentState::Submitted => Self::SUBMITTED,
            AssignmentState::Graded => Self::GRADED,
        }
    }
}

impl<'de> Deserialize<'de> for AssignmentState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AssignmentState>()
            .map_err(|_| {
                serde::de::Error::custom(format!(
                    "Invalid assignment state: '{s}'. Supported: DRAFT, SUBMITTED, GRADED"
                ))
            })
    }
}

impl std::fmt::Display for AssignmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssignmentState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(AssignmentState::Draft),
            "SUBMITTED" => Ok(AssignmentState::Submitted),
            "GRADED" => Ok(AssignmentState::Graded),
            _ => Err(format!("Invalid assignment state: {s}")),
        }
    }
}

// 成绩等级
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Grade>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            _ => Err(format!("Invalid grade: '{s}'. Must be one of: A, B, C, D")),
        }
    }
}

/// 作业
///
/// `grade` 仅在 `state == Graded` 时存在，修改两者请通过 [`Assignment::mark_graded`]。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 作业内容
    pub content: Option<String>,
    // 当前状态
    pub state: AssignmentState,
    // 提交学生的用户 ID
    pub student_id: String,
    // 负责批改的教师用户 ID
    pub teacher_id: Option<String>,
    // 成绩
    pub grade: Option<Grade>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 是否由指定用户负责批改
    pub fn is_taught_by(&self, user_id: &str) -> bool {
        self.teacher_id.as_deref() == Some(user_id)
    }

    /// 写入成绩并切换到已评分状态
    pub fn mark_graded(&mut self, grade: Grade) {
        self.grade = Some(grade);
        self.state = AssignmentState::Graded;
    }
}
