pub mod login;
pub mod me;
pub mod refresh;
pub mod signup;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::AuthUser;
use crate::models::auth::requests::{LoginRequest, RefreshTokenRequest, SignUpRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from(request),
        }
    }

    // 用户注册
    pub async fn signup(&self, req: SignUpRequest, request: &HttpRequest) -> Result<HttpResponse> {
        signup::handle_signup(self, req, request).await
    }

    // 登录验证
    pub async fn login(&self, req: LoginRequest, request: &HttpRequest) -> Result<HttpResponse> {
        login::handle_login(self, req, request).await
    }

    // 刷新令牌
    pub async fn refresh(
        &self,
        req: RefreshTokenRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        refresh::handle_refresh(self, req, request).await
    }

    // 获取当前用户信息
    pub async fn me(&self, user: AuthUser, request: &HttpRequest) -> Result<HttpResponse> {
        me::handle_me(self, user, request).await
    }
}
