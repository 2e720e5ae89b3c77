use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::{CourseService, ensure_center_owner};
use crate::errors::Result;
use crate::middlewares::AuthUser;
use crate::models::courses::requests::CreateCourseRequest;

pub async fn create_course(
    service: &CourseService,
    user: AuthUser,
    req: CreateCourseRequest,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    req.validate()?;
    ensure_center_owner(&storage, &user, req.edu_center_id).await?;

    let course = storage.create_course(req).await?;
    info!("Course {} created by {}", course.id, user.id);

    Ok(HttpResponse::Created().json(course))
}
