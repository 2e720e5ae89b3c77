use actix_web::{HttpRequest, HttpResponse, http::header::AUTHORIZATION};

use crate::errors::{EduMatchError, Result};
use crate::models::auth::{requests::RefreshTokenRequest, responses::RefreshTokenResponse};
use crate::services::jwt_from;

use super::AuthService;

// 请求体优先，其次是 Authorization 头
fn presented_token(req: RefreshTokenRequest, request: &HttpRequest) -> Option<String> {
    req.refresh_token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| {
            request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(|h| h.to_string())
        })
}

/// 用 refresh token 换取新的 access token，refresh token 本身不轮换
pub async fn handle_refresh(
    service: &AuthService,
    req: RefreshTokenRequest,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let jwt = jwt_from(request)?;
    let token = presented_token(req, request).ok_or(EduMatchError::Unauthorized)?;

    let (user_id, access_token) = jwt.refresh_access_token(&token)?;

    if jwt.check_user_exists() {
        let storage = service.get_storage(request)?;
        storage
            .get_user_by_id(user_id)
            .await?
            .ok_or(EduMatchError::UserNoLongerExist)?;
    }

    Ok(HttpResponse::Ok().json(RefreshTokenResponse {
        access_token,
        expires_in: jwt.access_expires_in(),
    }))
}
