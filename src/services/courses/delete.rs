use actix_web::{HttpRequest, HttpResponse};
use tracing::info;
use uuid::Uuid;

use super::{CourseService, ensure_center_owner};
use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::MessageResponse;

pub async fn delete_course(
    service: &CourseService,
    user: AuthUser,
    id: Uuid,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;

    let course = storage
        .get_course_by_id(id)
        .await?
        .ok_or(EduMatchError::CourseNotFound)?;
    ensure_center_owner(&storage, &user, course.edu_center_id).await?;

    if !storage.delete_course(id).await? {
        return Err(EduMatchError::CourseNotFound);
    }
    info!("Course {} deleted by {}", id, user.id);

    Ok(HttpResponse::Ok().json(MessageResponse::new("course deleted")))
}
