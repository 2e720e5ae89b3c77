use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, web};
use once_cell::sync::Lazy;

use super::upload_config;
use crate::errors::Result;
use crate::middlewares::{self, AuthUser};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UserListParams;
use crate::services::UserService;
use crate::utils::SafeUuid;
use crate::utils::multipart::{AVATAR_FIELD, read_form};

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn list_users(req: HttpRequest, query: web::Query<UserListParams>) -> Result<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn get_user(req: HttpRequest, user_id: SafeUuid) -> Result<HttpResponse> {
    USER_SERVICE.get_user(user_id.0, &req).await
}

pub async fn update_user(
    req: HttpRequest,
    user: AuthUser,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_form(payload, AVATAR_FIELD, &*upload_config(&req)?).await?;
    USER_SERVICE.update_user(user, form, &req).await
}

pub async fn delete_user(req: HttpRequest, user: AuthUser, user_id: SafeUuid) -> Result<HttpResponse> {
    USER_SERVICE.delete_user(user, user_id.0, &req).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/")
                    // 用户列表 - 仅管理员
                    .route(
                        web::get()
                            .to(list_users)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    // 修改自己的资料（multipart，可上传头像）
                    .route(web::patch().to(update_user)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_user))
                    // 本人或管理员，在业务层检查
                    .route(web::delete().to(delete_user)),
            ),
    );
}
