pub mod error_logger;
pub mod require_jwt;
pub mod require_role;

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use uuid::Uuid;

use crate::errors::EduMatchError;
use crate::models::users::entities::UserRole;

pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

/// 通过认证的调用者，由 RequireJWT 写入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl FromRequest for AuthUser {
    type Error = EduMatchError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .copied()
                .ok_or(EduMatchError::Unauthorized),
        )
    }
}
