//! 身份校验
//!
//! 任何解析失败、字段缺失或存储错误都视为身份无效，不向调用方抛出。

use tracing::{debug, warn};

use crate::models::principals::entities::{Principal, PrincipalToken};
use crate::storage::Storage;

/// 校验 `X-Principal` 原文并返回匹配的身份主体
pub async fn verify_principal(storage: &dyn Storage, raw: &str) -> Option<Principal> {
    let Some(token) = PrincipalToken::parse(raw) else {
        debug!("Rejected malformed principal token");
        return None;
    };

    match storage
        .find_principal(&token.principal_id, &token.user_id)
        .await
    {
        Ok(principal) => principal,
        Err(e) => {
            warn!(
                "Principal lookup failed for principal_id {}: {}",
                token.principal_id, e
            );
            None
        }
    }
}

/// 身份是否有效
pub async fn is_valid_principal(storage: &dyn Storage, raw: &str) -> bool {
    verify_principal(storage, raw).await.is_some()
}
