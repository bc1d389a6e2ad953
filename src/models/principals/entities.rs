use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 身份主体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Principal {
    pub id: String,
    pub user_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// `X-Principal` 请求头中携带的身份声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalToken {
    pub user_id: String,
    pub principal_id: String,
}

impl PrincipalToken {
    /// 解析请求头原文
    ///
    /// 必须是 JSON 对象，且 `user_id` 与 `principal_id` 均非空；
    /// 允许字符串或整数，整数统一转为十进制字符串。
    pub fn parse(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let object = value.as_object()?;

        Some(Self {
            user_id: id_field(object.get("user_id"))?,
            principal_id: id_field(object.get("principal_id"))?,
        })
    }
}

fn id_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(0), _) => None,
            (Some(i), _) => Some(i.to_string()),
            (None, Some(u)) => Some(u.to_string()),
            _ => None,
        },
        _ => None,
    }
}
