/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后执行（即先 `.wrap(RequireRole)` 再 `.wrap(RequireJWT)`），
 * 用于验证调用者的角色是否在允许列表中。
 *
 * ```rust,ignore
 * web::resource("/")
 *     .route(web::get().to(list_users))
 *     .wrap(RequireRole::new(&UserRole::Admin))
 *     .wrap(RequireJWT)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, ResponseError,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::errors::EduMatchError;
use crate::middlewares::AuthUser;
use crate::models::users::entities::UserRole;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Vec<UserRole>,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: &UserRole) -> Self {
        Self {
            allowed_roles: vec![*role],
        }
    }

    /// 创建需要任一角色的中间件，空列表表示任何已认证用户
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed_roles: roles.iter().map(|r| **r).collect(),
        }
    }

    fn permits(allowed_roles: &[UserRole], role: UserRole) -> bool {
        allowed_roles.is_empty() || allowed_roles.contains(&role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<UserRole>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let user = req.extensions().get::<AuthUser>().copied();

            match user {
                Some(user) if RequireRole::permits(&allowed_roles, user.role) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(user) => {
                    info!(
                        "Access denied for user {} (role: {}). Allowed roles: {:?}",
                        user.id, user.role, allowed_roles
                    );
                    Ok(req.into_response(
                        EduMatchError::Unauthorized
                            .error_response()
                            .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no authenticated user in request. Make sure RequireJWT runs first."
                    );
                    Ok(req.into_response(
                        EduMatchError::Unauthorized
                            .error_response()
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::middlewares::RequireJWT;
    use crate::utils::jwt::{JwtUtils, TokenKind};
    use actix_web::{App, HttpResponse, http::StatusCode, http::header::AUTHORIZATION, test, web};
    use uuid::Uuid;

    fn jwt() -> JwtUtils {
        // 不检查用户存在性，令牌本身即可说明身份
        JwtUtils::new(&JwtConfig {
            secret: "access".to_string(),
            refresh_secret: "refresh".to_string(),
            access_token_expiry: 1,
            refresh_token_expiry: 2,
            check_user_exists: false,
        })
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_admin_gate() {
        let jwt = jwt();
        let user_token = jwt
            .issue(Uuid::new_v4(), UserRole::User, TokenKind::Access)
            .unwrap();
        let admin_token = jwt
            .issue(Uuid::new_v4(), UserRole::Admin, TokenKind::Access)
            .unwrap();

        let app = test::init_service(
            App::new().app_data(web::Data::new(jwt)).service(
                web::resource("/admin")
                    .to(ok)
                    .wrap(RequireRole::new(&UserRole::Admin))
                    .wrap(RequireJWT),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header((AUTHORIZATION, format!("Bearer {user_token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["error"], "unauthorized");

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header((AUTHORIZATION, format!("Bearer {admin_token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_empty_role_list_allows_any_user() {
        let jwt = jwt();
        let token = jwt
            .issue(Uuid::new_v4(), UserRole::User, TokenKind::Access)
            .unwrap();

        let app = test::init_service(
            App::new().app_data(web::Data::new(jwt)).service(
                web::resource("/any")
                    .to(ok)
                    .wrap(RequireRole::new_any(&[]))
                    .wrap(RequireJWT),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/any")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_without_jwt_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::resource("/admin")
                    .to(ok)
                    .wrap(RequireRole::new_any(UserRole::admin_roles())),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/admin").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
