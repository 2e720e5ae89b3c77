use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::CourseService;
use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::MessageResponse;
use crate::models::ratings::{CourseRatingRequest, RatingTarget, validate_score};

pub async fn give_rating(
    service: &CourseService,
    user: AuthUser,
    req: CourseRatingRequest,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    validate_score(req.score)?;

    storage
        .get_course_by_id(req.course_id)
        .await?
        .ok_or(EduMatchError::CourseNotFound)?;

    storage
        .create_rating(user.id, RatingTarget::Course(req.course_id), req.score)
        .await?;
    info!("User {} rated Course {} with {}", user.id, req.course_id, req.score);

    Ok(HttpResponse::Created().json(MessageResponse::new("rating created")))
}
