use actix_web::{HttpRequest, HttpResponse};

use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::auth::responses::UserInfoResponse;

use super::AuthService;

pub async fn handle_me(
    service: &AuthService,
    user: AuthUser,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = storage
        .get_user_by_id(user.id)
        .await?
        .ok_or(EduMatchError::UserNoLongerExist)?;
    Ok(HttpResponse::Ok().json(UserInfoResponse { user }))
}
