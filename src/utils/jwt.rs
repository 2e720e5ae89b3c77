use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::errors::{EduMatchError, Result};
use crate::models::users::entities::UserRole;

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,    // 用户 ID (UUID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

/// 令牌类型，各自使用独立的密钥
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

// Token 响应结构体
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// 只接受 HMAC 系列算法
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Clone)]
pub struct JwtUtils {
    access_secret: String,
    refresh_secret: String,
    access_expiry: Duration,
    refresh_expiry: Duration,
    check_user_exists: bool,
}

impl JwtUtils {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            access_secret: config.secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_expiry: Duration::hours(config.access_token_expiry),
            refresh_expiry: Duration::hours(config.refresh_token_expiry),
            check_user_exists: config.check_user_exists,
        }
    }

    /// 校验令牌后是否还要确认用户未被删除
    pub fn check_user_exists(&self) -> bool {
        self.check_user_exists
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.access_secret.as_bytes(),
            TokenKind::Refresh => self.refresh_secret.as_bytes(),
        }
    }

    /// access token 有效期（秒）
    pub fn access_expires_in(&self) -> i64 {
        self.access_expiry.num_seconds()
    }

    // 生成指定类型的 Token
    pub fn issue(&self, user_id: Uuid, role: UserRole, kind: TokenKind) -> Result<String> {
        let expiry = match kind {
            TokenKind::Access => self.access_expiry,
            TokenKind::Refresh => self.refresh_expiry,
        };
        self.issue_with_expiry(user_id, role, kind, expiry)
    }

    // 生成带自定义过期时间的 Token
    pub fn issue_with_expiry(
        &self,
        user_id: Uuid,
        role: UserRole,
        kind: TokenKind,
        expiry: Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let expiration = now + expiry;

        let claims = Claims {
            user_id: user_id.to_string(),
            role: role.to_string(),
            token_type: kind.as_str().to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret(kind)),
        )
        .map_err(|e| EduMatchError::internal(format!("JWT 签发失败: {e}")))
    }

    /// 校验令牌，返回用户 ID 与角色
    ///
    /// 允许带 "Bearer " 前缀。签名、过期、算法、类型或字段格式任何一项不符都返回
    /// `InvalidToken`。
    pub fn validate(&self, token: &str, kind: TokenKind) -> Result<(Uuid, UserRole)> {
        let token = token.trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();

        let claims = decode::<Claims>(token, &DecodingKey::from_secret(self.secret(kind)), &validation)?
            .claims;

        if claims.token_type != kind.as_str() {
            return Err(EduMatchError::InvalidToken);
        }
        let user_id = Uuid::parse_str(&claims.user_id).map_err(|_| EduMatchError::InvalidToken)?;
        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(|_| EduMatchError::InvalidToken)?;

        Ok((user_id, role))
    }

    // 生成完整的 Token 对（包含 access 和 refresh token）
    pub fn token_pair(&self, user_id: Uuid, role: UserRole) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, role, TokenKind::Access)?,
            refresh_token: self.issue(user_id, role, TokenKind::Refresh)?,
        })
    }

    // 使用 Refresh Token 生成新的 Access Token，refresh token 本身不轮换
    pub fn refresh_access_token(&self, refresh_token: &str) -> Result<(Uuid, String)> {
        let (user_id, role) = self.validate(refresh_token, TokenKind::Refresh)?;
        let access_token = self.issue(user_id, role, TokenKind::Access)?;
        Ok((user_id, access_token))
    }
}
