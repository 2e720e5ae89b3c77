use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use crate::errors::Result;
use crate::models::auth::{requests::SignUpRequest, responses::TokenPairResponse};
use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
use crate::services::jwt_from;
use crate::utils::password::hash_password;
use crate::utils::validate::validate_sign_up;

use super::AuthService;

pub async fn handle_signup(
    service: &AuthService,
    req: SignUpRequest,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let jwt = jwt_from(request)?;

    // 1. 校验用户名、邮箱与密码强度
    validate_sign_up(&req)?;

    // 2. 哈希密码后创建用户，用户名重复由存储层返回 UserExists
    let password_hash = hash_password(&req.password)?;
    let user = storage
        .create_user(CreateUserRequest {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            username: req.username,
            email: req.email,
            password_hash,
            role: UserRole::User,
        })
        .await?;

    // 3. 签发令牌对
    let tokens = jwt.token_pair(user.id, user.role)?;
    info!("User {} signed up", user.username);

    Ok(HttpResponse::Created().json(TokenPairResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: jwt.access_expires_in(),
        user,
    }))
}
