use actix_web::{HttpRequest, HttpResponse};
use uuid::Uuid;

use super::CourseService;
use crate::errors::{EduMatchError, Result};

pub async fn get_course(
    service: &CourseService,
    id: Uuid,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let course = storage
        .get_course_by_id(id)
        .await?
        .ok_or(EduMatchError::CourseNotFound)?;
    Ok(HttpResponse::Ok().json(course))
}
