use config::{Config, ConfigError, Environment, File};

use super::{AppConfig, DatabaseConfig, JwtConfig};

// 未配置时的 JWT 密钥，只能用于开发环境
const DEFAULT_JWT_SECRET: &str = "nothing";
const DEFAULT_JWT_REFRESH_SECRET: &str = "nothing-refresh";

/// 令牌有效期上限（小时）
const MAX_TOKEN_EXPIRY_HOURS: i64 = 24 * 365 * 10;

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值，保证没有配置文件也能启动
            .set_default("app.system_name", "EduMatch")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", 0)?
            .set_default("server.max_workers", 16)?
            .set_default("server.timeouts.client_request", 5000)?
            .set_default("server.timeouts.client_disconnect", 1000)?
            .set_default("server.timeouts.keep_alive", 75)?
            .set_default("server.limits.max_payload_size", 10 * 1024 * 1024)?
            .set_default("jwt.secret", DEFAULT_JWT_SECRET)?
            .set_default("jwt.refresh_secret", DEFAULT_JWT_REFRESH_SECRET)?
            .set_default("jwt.access_token_expiry", 24)?
            .set_default("jwt.refresh_token_expiry", 30 * 24)?
            .set_default("jwt.check_user_exists", true)?
            .set_default("database.url", "")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.name", "edumatch")?
            .set_default("database.pool_size", 10)?
            .set_default("database.timeout", 30)?
            .set_default("cache.default_ttl", 300)?
            .set_default("cache.max_capacity", 10_000)?
            .set_default("cors.max_age", 3600)?
            .set_default("upload.dir", "uploads")?
            .set_default("upload.max_size", 5 * 1024 * 1024)?
            .set_default("upload.max_field_size", 64 * 1024)?
            // 然后加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("EDUMATCH")
                    .separator("__")
                    .try_parsing(true),
            );

        // 兼容部署脚本使用的环境变量名
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option(
                "jwt.refresh_secret",
                std::env::var("JWT_REFRESH_SECRET").ok(),
            )?
            .set_override_option(
                "jwt.access_token_expiry",
                std::env::var("JWT_EXP_TIME").ok(),
            )?
            .set_override_option(
                "jwt.refresh_token_expiry",
                std::env::var("JWT_REFRESH_EXP_TIME").ok(),
            )?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("database.host", std::env::var("POSTGRES_HOST").ok())?
            .set_override_option("database.port", std::env::var("POSTGRES_PORT").ok())?
            .set_override_option("database.user", std::env::var("POSTGRES_USER").ok())?
            .set_override_option(
                "database.password",
                std::env::var("POSTGRES_PASSWORD").ok(),
            )?
            .set_override_option("database.name", std::env::var("POSTGRES_DB").ok())?
            .set_override_option("upload.dir", std::env::var("UPLOAD_DIR").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.jwt.validate(&app_config.app.environment)?;

        Ok(app_config)
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl JwtConfig {
    /// 是否仍在使用内置的默认密钥
    pub fn uses_default_secrets(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET || self.refresh_secret == DEFAULT_JWT_REFRESH_SECRET
    }

    /// 有效期必须在 1..=MAX_TOKEN_EXPIRY_HOURS 小时内，非开发环境不允许默认或空密钥
    pub fn validate(&self, environment: &str) -> Result<(), ConfigError> {
        for (name, hours) in [
            ("access_token_expiry", self.access_token_expiry),
            ("refresh_token_expiry", self.refresh_token_expiry),
        ] {
            if !(1..=MAX_TOKEN_EXPIRY_HOURS).contains(&hours) {
                return Err(ConfigError::Message(format!(
                    "jwt.{name} must be between 1 and {MAX_TOKEN_EXPIRY_HOURS} hours"
                )));
            }
        }

        if environment != "development"
            && (self.uses_default_secrets() || self.secret.is_empty() || self.refresh_secret.is_empty())
        {
            return Err(ConfigError::Message(
                "JWT_SECRET and JWT_REFRESH_SECRET must be set outside development".to_string(),
            ));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// 构建数据库连接 URL
    pub fn connection_url(&self) -> String {
        if !self.url.is_empty() {
            return self.url.clone();
        }
        if self.password.is_empty() {
            format!(
                "postgres://{}@{}:{}/{}",
                self.user, self.host, self.port, self.name
            )
        } else {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            )
        }
    }
}
