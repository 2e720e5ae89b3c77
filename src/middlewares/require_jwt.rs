/*!
 * JWT 认证中间件
 *
 * 令牌来自 `Authorization: Bearer <token>` 头，缺失时读取 `?token=` 查询参数。
 * 校验通过后把 [`AuthUser`] 写入请求扩展，处理函数直接以 `AuthUser` 作为参数提取。
 *
 * ```rust,ignore
 * web::scope("/api/educenters")
 *     .service(
 *         web::resource("/")
 *             .route(web::post().to(create_edu_center))
 *             .wrap(RequireJWT),
 *     )
 * ```
 *
 * 依赖的 app_data：`Data<JwtUtils>`、`Data<Arc<dyn Storage>>`，
 * 以及可选的 `Data<Arc<dyn ObjectCache>>`（缓存用户存在性检查）。
 */

use crate::cache::{self, CacheResult, ObjectCache};
use crate::errors::EduMatchError;
use crate::middlewares::AuthUser;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::{JwtUtils, TokenKind};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, ResponseError,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde::Deserialize;
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct RequireJWT;

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

// 先读 Authorization 头，再读 ?token= 查询参数
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(header) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.trim().is_empty())
    {
        return Some(header.to_string());
    }

    web::Query::<TokenQuery>::from_query(req.query_string())
        .ok()
        .and_then(|q| q.into_inner().token)
        .filter(|t| !t.is_empty())
}

// 确认用户仍然存在（未被软删除），结果缓存在 ObjectCache 中
async fn ensure_user_exists(req: &ServiceRequest, user_id: uuid::Uuid) -> Result<(), EduMatchError> {
    let object_cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());
    let key = cache::user_key(user_id);

    if let Some(store) = &object_cache
        && let CacheResult::Found(_) = cache::get_json::<User>(store.as_ref(), &key).await
    {
        return Ok(());
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| EduMatchError::internal("Storage not found in app data"))?;

    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or(EduMatchError::UserNoLongerExist)?;

    if let Some(store) = &object_cache {
        cache::insert_json(store.as_ref(), key, &user).await;
    }
    Ok(())
}

// 提取并验证 JWT access token
async fn authenticate(req: &ServiceRequest) -> Result<AuthUser, EduMatchError> {
    let token = extract_token(req).ok_or(EduMatchError::Unauthorized)?;

    let jwt = req
        .app_data::<web::Data<JwtUtils>>()
        .ok_or_else(|| EduMatchError::internal("JwtUtils not found in app data"))?;

    let (id, role) = jwt.validate(&token, TokenKind::Access)?;

    if jwt.check_user_exists() {
        ensure_user_exists(req, id).await?;
    }

    Ok(AuthUser { id, role })
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
            match authenticate(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    if err.is_internal() {
                        error!("JWT authentication error for {}: {}", req.path(), err);
                    } else {
                        info!("JWT authentication failed for {}: {}", req.path(), err);
                    }
                    Ok(req.into_response(err.error_response().map_into_right_body()))
                }
            }
        })
    }
}
