use serde::Deserialize;

// 用户注册请求
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// 刷新令牌请求，令牌也可以放在 Authorization 头中
#[derive(Debug, Default, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}
