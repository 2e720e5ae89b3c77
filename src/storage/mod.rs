use std::sync::Arc;

use uuid::Uuid;

use crate::config::DatabaseConfig;
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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 服务层与数据库之间唯一的接口，所有读取都排除已软删除的记录
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，用户名或邮箱重复时返回 UserExists
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: Uuid, update: UpdateUserRequest) -> Result<Option<User>>;
    // 软删除用户
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 教育中心管理方法
    // 在一个事务中创建教育中心与联系方式
    async fn create_edu_center(
        &self,
        owner_id: Uuid,
        req: CreateEduCenterRequest,
        cover_image: Option<String>,
    ) -> Result<EduCenter>;
    // 通过ID获取教育中心
    async fn get_edu_center_by_id(&self, id: Uuid) -> Result<Option<EduCenter>>;
    // 列出教育中心
    async fn list_edu_centers_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<EduCenterListResponse>;
    // 在一个事务中更新教育中心与联系方式，cover_image 为 None 时保留原封面
    async fn update_edu_center(
        &self,
        id: Uuid,
        req: UpdateEduCenterRequest,
        cover_image: Option<String>,
    ) -> Result<Option<EduCenter>>;
    // 软删除教育中心
    async fn delete_edu_center(&self, id: Uuid) -> Result<bool>;
    // 所有教育中心的坐标
    async fn list_edu_center_points(&self) -> Result<Vec<GeoPoint>>;
    // 按ID批量获取教育中心
    async fn get_edu_centers_by_ids(&self, ids: &[Uuid]) -> Result<Vec<EduCenter>>;

    /// 课程管理方法
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: Uuid) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: PaginationQuery,
        edu_center_id: Option<Uuid>,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, req: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: Uuid) -> Result<bool>;

    /// 评分
    async fn create_rating(&self, owner_id: Uuid, target: RatingTarget, score: i32) -> Result<()>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
