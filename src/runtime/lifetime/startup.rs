use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::{Storage, create_storage};
use crate::utils::ImageStore;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const ADMIN_USERNAME: &str = "admin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub jwt: JwtUtils,
    pub images: ImageStore,
}

/// 生成随机密码，保证包含大小写字母和数字
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    let body: String = (0..length.saturating_sub(3))
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();
    format!(
        "{body}{}{}{}",
        rng.random_range(b'A'..=b'Z') as char,
        rng.random_range(b'a'..=b'z') as char,
        rng.random_range(b'0'..=b'9') as char
    )
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个默认的 admin 账号
pub async fn seed_admin(storage: &Arc<dyn Storage>, password: Option<String>) -> Result<bool> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!(
            "Database already has {} user(s), skipping admin seed",
            count
        );
        return Ok(false);
    }
    info!("No users found in database, creating default admin account...");

    // 获取密码：优先使用传入的密码，否则生成随机密码
    let password = password.filter(|p| !p.is_empty()).unwrap_or_else(|| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let user = storage
        .create_user(CreateUserRequest {
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            username: ADMIN_USERNAME.to_string(),
            email: None,
            password_hash: hash_password(&password)?,
            role: UserRole::Admin,
        })
        .await?;
    info!(
        "Default admin account created successfully (ID: {}, username: {})",
        user.id, user.username
    );
    Ok(true)
}

/// 准备服务器启动的上下文
/// 包括存储、缓存、令牌与图片存储
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    if let Err(e) = seed_admin(&storage, std::env::var("ADMIN_PASSWORD").ok()).await {
        warn!("Failed to seed admin account: {}", e.detail());
    }

    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(&config.cache));
    warn!("Cache backend initialized");

    if config.jwt.uses_default_secrets() {
        warn!("JWT secrets are not configured, using built-in development defaults");
    }

    Ok(StartupContext {
        storage,
        cache,
        jwt: JwtUtils::new(&config.jwt),
        images: ImageStore::new(&config.upload),
    })
}
