pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::Result;
use crate::middlewares::AuthUser;
use crate::models::users::requests::UserListParams;
use crate::storage::Storage;
use crate::utils::ImageStore;
use crate::utils::multipart::MultipartForm;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
    images: Option<ImageStore>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            images: None,
        }
    }

    pub fn new(storage: Arc<dyn Storage>, images: ImageStore) -> Self {
        Self {
            storage: Some(storage),
            images: Some(images),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from(request),
        }
    }

    pub(crate) fn get_image_store(&self, request: &HttpRequest) -> Result<ImageStore> {
        match &self.images {
            Some(images) => Ok(images.clone()),
            None => super::image_store_from(request).map(|d| d.get_ref().clone()),
        }
    }

    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: Uuid, request: &HttpRequest) -> Result<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新当前用户资料（含头像）
    pub async fn update_user(
        &self,
        user: AuthUser,
        form: MultipartForm,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        update::update_user(self, user, form, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user: AuthUser,
        user_id: Uuid,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        delete::delete_user(self, user, user_id, request).await
    }
}
