use actix_web::{HttpRequest, HttpResponse, web};
use once_cell::sync::Lazy;

use crate::errors::Result;
use crate::middlewares::{self, AuthUser};
use crate::models::auth::requests::{LoginRequest, RefreshTokenRequest, SignUpRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn signup(req: HttpRequest, user_data: web::Json<SignUpRequest>) -> Result<HttpResponse> {
    AUTH_SERVICE.signup(user_data.into_inner(), &req).await
}

pub async fn login(req: HttpRequest, user_data: web::Json<LoginRequest>) -> Result<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

// 令牌可以放在请求体或 Authorization 头中，因此请求体可以为空
pub async fn refresh_token(
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse> {
    let body = body.map(|b| b.into_inner()).unwrap_or_default();
    AUTH_SERVICE.refresh(body, &req).await
}

pub async fn me(req: HttpRequest, user: AuthUser) -> Result<HttpResponse> {
    AUTH_SERVICE.me(user, &req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh_token))
            .service(
                web::resource("/me")
                    .route(web::get().to(me))
                    .wrap(middlewares::RequireJWT),
            ),
    );
}
