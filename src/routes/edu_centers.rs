use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, web};
use once_cell::sync::Lazy;

use super::upload_config;
use crate::errors::Result;
use crate::middlewares::{self, AuthUser};
use crate::models::PaginationQuery;
use crate::models::edu_centers::requests::LocationQuery;
use crate::models::ratings::EduCenterRatingRequest;
use crate::services::EduCenterService;
use crate::utils::SafeUuid;
use crate::utils::multipart::{COVER_IMAGE_FIELD, read_form};

// 懒加载的全局 EduCenterService 实例
static EDU_CENTER_SERVICE: Lazy<EduCenterService> = Lazy::new(EduCenterService::new_lazy);

pub async fn list_edu_centers(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse> {
    EDU_CENTER_SERVICE
        .list_edu_centers(query.into_inner(), &req)
        .await
}

pub async fn get_edu_center(req: HttpRequest, id: SafeUuid) -> Result<HttpResponse> {
    EDU_CENTER_SERVICE.get_edu_center(id.0, &req).await
}

pub async fn create_edu_center(
    req: HttpRequest,
    user: AuthUser,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_form(payload, COVER_IMAGE_FIELD, &*upload_config(&req)?).await?;
    EDU_CENTER_SERVICE.create_edu_center(user, form, &req).await
}

pub async fn update_edu_center(
    req: HttpRequest,
    user: AuthUser,
    id: SafeUuid,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_form(payload, COVER_IMAGE_FIELD, &*upload_config(&req)?).await?;
    EDU_CENTER_SERVICE
        .update_edu_center(user, id.0, form, &req)
        .await
}

pub async fn delete_edu_center(req: HttpRequest, user: AuthUser, id: SafeUuid) -> Result<HttpResponse> {
    EDU_CENTER_SERVICE.delete_edu_center(user, id.0, &req).await
}

pub async fn give_rating(
    req: HttpRequest,
    user: AuthUser,
    body: web::Json<EduCenterRatingRequest>,
) -> Result<HttpResponse> {
    EDU_CENTER_SERVICE
        .give_rating(user, body.into_inner(), &req)
        .await
}

pub async fn location(req: HttpRequest, body: web::Json<LocationQuery>) -> Result<HttpResponse> {
    EDU_CENTER_SERVICE.nearest(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_edu_center_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/educenters")
            .service(
                web::resource("/")
                    .route(web::get().to(list_edu_centers))
                    .route(
                        web::post()
                            .to(create_edu_center)
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            // 评分需要登录，按距离查询公开
            .service(
                web::resource("/rating")
                    .route(web::post().to(give_rating).wrap(middlewares::RequireJWT)),
            )
            .service(web::resource("/location").route(web::post().to(location)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_edu_center))
                    // 所有者或管理员，在业务层检查
                    .route(
                        web::patch()
                            .to(update_edu_center)
                            .wrap(middlewares::RequireJWT),
                    )
                    .route(
                        web::delete()
                            .to(delete_edu_center)
                            .wrap(middlewares::RequireJWT),
                    ),
            ),
    );
}
