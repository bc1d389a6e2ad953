/*!
 * 身份主体认证中间件
 *
 * 校验 `X-Principal` 请求头，确保只有已登记的身份主体才能访问受保护的路由。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequirePrincipal;
 *
 * cfg.service(
 *     web::scope("/principal")
 *         .wrap(RequirePrincipal)
 *         .route("/assignments", web::get().to(list_assignments)),
 * );
 *
 * async fn list_assignments(req: HttpRequest) -> Result<HttpResponse> {
 *     let principal = RequirePrincipal::extract_principal(&req);
 *     ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中携带 `X-Principal: {"user_id": ..., "principal_id": ...}`
 * 2. 中间件解析请求头，并按 `(principal_id, user_id)` 查询身份主体
 * 3. 匹配成功则把 `Principal` 存入请求扩展，继续处理请求
 * 4. 请求头缺失、格式错误或无匹配记录时返回 401，不透露具体原因
 */

use crate::errors::GradingError;
use crate::models::principals::entities::Principal;
use crate::services::identity::verify_principal;
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse, ResponseError,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

pub const PRINCIPAL_HEADER: &str = "X-Principal";

#[derive(Clone)]
pub struct RequirePrincipal;

fn unauthorized() -> HttpResponse {
    GradingError::authentication("Unauthorized").error_response()
}

// 辅助函数：提取并校验身份主体
async fn extract_and_verify(req: &ServiceRequest) -> Result<Principal, HttpResponse> {
    let raw = req
        .headers()
        .get(PRINCIPAL_HEADER)
        .and_then(|h| std::str::from_utf8(h.as_bytes()).ok())
        .ok_or_else(unauthorized)?;

    let Some(storage) = req.app_data::<actix_web::web::Data<Arc<dyn Storage>>>() else {
        error!("Storage not found in app data");
        return Err(GradingError::database_config("Storage unavailable").error_response());
    };

    verify_principal(storage.get_ref().as_ref(), raw)
        .await
        .ok_or_else(unauthorized)
}

impl<S, B> Transform<S, ServiceRequest> for RequirePrincipal
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePrincipalMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePrincipalMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequirePrincipalMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequirePrincipalMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    HttpResponse::NoContent().finish().map_into_right_body(),
                ));
            }

            match extract_and_verify(&req).await {
                Ok(principal) => {
                    debug!(
                        "Principal authentication successful for ID: {}",
                        principal.id
                    );
                    req.extensions_mut().insert(principal);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(resp) => {
                    info!(
                        "Principal authentication failed for request to {}",
                        req.path()
                    );
                    Ok(req.into_response(resp.map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取身份信息
impl RequirePrincipal {
    /// 从请求扩展中提取已校验的身份主体
    /// 此函数应该在应用了 RequirePrincipal 中间件的路由处理程序中使用
    pub fn extract_principal(req: &actix_web::HttpRequest) -> Option<Principal> {
        req.extensions().get::<Principal>().cloned()
    }

    /// 从请求扩展中提取用户 ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<String> {
        req.extensions()
            .get::<Principal>()
            .map(|principal| principal.user_id.clone())
    }
}
