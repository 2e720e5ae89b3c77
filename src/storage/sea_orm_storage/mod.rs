//! SeaORM 存储实现
//!
//! 统一的数据库存储层，生产环境使用 PostgreSQL，本地与测试可使用 SQLite。

mod courses;
mod edu_centers;
mod ratings;
mod users;


use crate::config::DatabaseConfig;
use crate::errors::{EduMatchError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// 唯一约束冲突转换为对应的领域错误，其余作为数据库错误
pub(crate) fn map_db_err(err: DbErr, conflict: EduMatchError, context: &str) -> EduMatchError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict,
        _ => EduMatchError::database(format!("{context}: {err}")),
    }
}

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.connection_url())?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EduMatchError::database(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成");

        Ok(Self { db })
    }

    /// 内存 SQLite 存储，供测试使用
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            host: String::new(),
            port: 0,
            user: String::new(),
            password: String::new(),
            name: String::new(),
            pool_size: 1,
            timeout: 5,
        })
        .await
    }

    /// SQLite 专用连接（文件库启用 WAL；内存库只能使用单个连接）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduMatchError::database(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let pool_options = if in_memory {
            // 连接关闭后内存库即消失
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| EduMatchError::database(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| EduMatchError::database(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:")
            || url.starts_with("postgres://")
            || url.starts_with("postgresql://")
        {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else {
            Err(EduMatchError::Config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    PaginationQuery,
    courses::{
        entities::Course,
        requests::{CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    edu_centers::{
        entities::{EduCenter, GeoPoint},
        requests::{CreateEduCenterRequest, UpdateEduCenterRequest},
        responses::EduCenterListResponse,
    },
    ratings::RatingTarget,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: Uuid, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 教育中心模块
    async fn create_edu_center(
        &self,
        owner_id: Uuid,
        req: CreateEduCenterRequest,
        cover_image: Option<String>,
    ) -> Result<EduCenter> {
        self.create_edu_center_impl(owner_id, req, cover_image).await
    }

    async fn get_edu_center_by_id(&self, id: Uuid) -> Result<Option<EduCenter>> {
        self.get_edu_center_by_id_impl(id).await
    }

    async fn list_edu_centers_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<EduCenterListResponse> {
        self.list_edu_centers_with_pagination_impl(query).await
    }

    async fn update_edu_center(
        &self,
        id: Uuid,
        req: UpdateEduCenterRequest,
        cover_image: Option<String>,
    ) -> Result<Option<EduCenter>> {
        self.update_edu_center_impl(id, req, cover_image).await
    }

    async fn delete_edu_center(&self, id: Uuid) -> Result<bool> {
        self.delete_edu_center_impl(id).await
    }

    async fn list_edu_center_points(&self) -> Result<Vec<GeoPoint>> {
        self.list_edu_center_points_impl().await
    }

    async fn get_edu_centers_by_ids(&self, ids: &[Uuid]) -> Result<Vec<EduCenter>> {
        self.get_edu_centers_by_ids_impl(ids).await
    }

    // 课程模块
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(req).await
    }

    async fn get_course_by_id(&self, id: Uuid) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: PaginationQuery,
        edu_center_id: Option<Uuid>,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query, edu_center_id)
            .await
    }

    async fn update_course(&self, req: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(req).await
    }

    async fn delete_course(&self, id: Uuid) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    // 评分模块
    async fn create_rating(&self, owner_id: Uuid, target: RatingTarget, score: i32) -> Result<()> {
        self.create_rating_impl(owner_id, target, score).await
    }
}
