use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use crate::errors::{EduMatchError, Result};
use crate::models::auth::{requests::LoginRequest, responses::TokenPairResponse};
use crate::services::jwt_from;
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    req: LoginRequest,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let jwt = jwt_from(request)?;

    let user = storage
        .get_user_by_username(req.username.trim())
        .await?
        .ok_or(EduMatchError::UserNotFound)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(EduMatchError::WrongPassword);
    }

    let tokens = jwt.token_pair(user.id, user.role)?;
    info!("User {} logged in successfully", user.username);

    Ok(HttpResponse::Ok().json(TokenPairResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: jwt.access_expires_in(),
        user,
    }))
}
