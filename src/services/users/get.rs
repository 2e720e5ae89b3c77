use actix_web::{HttpRequest, HttpResponse};
use uuid::Uuid;

use super::UserService;
use crate::errors::{EduMatchError, Result};
use crate::models::users::responses::UserResponse;

pub async fn get_user(
    service: &UserService,
    user_id: Uuid,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;

    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or(EduMatchError::UserNotFound)?;
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}
