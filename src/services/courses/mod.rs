pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod rating;
pub mod update;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest};
use crate::models::ratings::CourseRatingRequest;
use crate::services::ensure_owner;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    pub async fn create_course(
        &self,
        user: AuthUser,
        req: CreateCourseRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        create::create_course(self, user, req, request).await
    }

    pub async fn get_course(&self, id: Uuid, request: &HttpRequest) -> Result<HttpResponse> {
        get::get_course(self, id, request).await
    }

    pub async fn list_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    pub async fn update_course(
        &self,
        user: AuthUser,
        req: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        update::update_course(self, user, req, request).await
    }

    pub async fn delete_course(
        &self,
        user: AuthUser,
        id: Uuid,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        delete::delete_course(self, user, id, request).await
    }

    // 给课程评分
    pub async fn give_rating(
        &self,
        user: AuthUser,
        req: CourseRatingRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        rating::give_rating(self, user, req, request).await
    }
}

/// 课程的管理权限来自所属教育中心
pub(crate) async fn ensure_center_owner(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    edu_center_id: Uuid,
) -> Result<()> {
    let center = storage
        .get_edu_center_by_id(edu_center_id)
        .await?
        .ok_or(EduMatchError::EduCenterNotFound)?;
    ensure_owner(user, center.owner_id)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use uuid::Uuid;

    use crate::middlewares::AuthUser;
    use crate::models::edu_centers::{entities::Contact, requests::CreateEduCenterRequest};
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    /// 一个用户和其名下的一个教育中心
    pub async fn storage_with_center() -> (Arc<dyn Storage>, AuthUser, Uuid) {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        let owner = storage
            .create_user(CreateUserRequest {
                first_name: "Sardor".to_string(),
                last_name: "Aliyev".to_string(),
                username: "sardor".to_string(),
                email: None,
                password_hash: "hash".to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        let center = storage
            .create_edu_center(
                owner.id,
                CreateEduCenterRequest {
                    name: "Algorithm".to_string(),
                    html_description: String::new(),
                    address: String::new(),
                    latitude: 41.3,
                    longitude: 69.2,
                    contact: Contact::default(),
                },
                None,
            )
            .await
            .unwrap();
        (
            storage,
            AuthUser {
                id: owner.id,
                role: owner.role,
            },
            center.id,
        )
    }

    pub fn stranger() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::User,
        }
    }
}
