use actix_web::{HttpRequest, HttpResponse, web};
use once_cell::sync::Lazy;

use crate::errors::Result;
use crate::middlewares::{self, AuthUser};
use crate::models::courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest};
use crate::models::ratings::CourseRatingRequest;
use crate::services::CourseService;
use crate::utils::SafeUuid;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(req: HttpRequest, query: web::Query<CourseListParams>) -> Result<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, id: SafeUuid) -> Result<HttpResponse> {
    COURSE_SERVICE.get_course(id.0, &req).await
}

pub async fn create_course(
    req: HttpRequest,
    user: AuthUser,
    body: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse> {
    COURSE_SERVICE
        .create_course(user, body.into_inner(), &req)
        .await
}

pub async fn update_course(
    req: HttpRequest,
    user: AuthUser,
    body: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse> {
    COURSE_SERVICE
        .update_course(user, body.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, user: AuthUser, id: SafeUuid) -> Result<HttpResponse> {
    COURSE_SERVICE.delete_course(user, id.0, &req).await
}

pub async fn give_rating(
    req: HttpRequest,
    user: AuthUser,
    body: web::Json<CourseRatingRequest>,
) -> Result<HttpResponse> {
    COURSE_SERVICE
        .give_rating(user, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .service(
                web::resource("/")
                    .route(web::get().to(list_courses))
                    // 创建、修改课程需要是所属教育中心的所有者或管理员
                    .route(web::post().to(create_course).wrap(middlewares::RequireJWT))
                    .route(web::put().to(update_course).wrap(middlewares::RequireJWT)),
            )
            .service(
                web::resource("/rating")
                    .route(web::post().to(give_rating).wrap(middlewares::RequireJWT)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_course))
                    .route(web::delete().to(delete_course).wrap(middlewares::RequireJWT)),
            ),
    );
}
