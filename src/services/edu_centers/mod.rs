pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod location;
pub mod rating;
pub mod update;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::Result;
use crate::middlewares::AuthUser;
use crate::models::PaginationQuery;
use crate::models::edu_centers::requests::LocationQuery;
use crate::models::ratings::EduCenterRatingRequest;
use crate::storage::Storage;
use crate::utils::ImageStore;
use crate::utils::multipart::MultipartForm;

pub struct EduCenterService {
    storage: Option<Arc<dyn Storage>>,
    images: Option<ImageStore>,
}

impl EduCenterService {
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

    // 创建教育中心（含联系方式与封面）
    pub async fn create_edu_center(
        &self,
        user: AuthUser,
        form: MultipartForm,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        create::create_edu_center(self, user, form, request).await
    }

    // 更新教育中心
    pub async fn update_edu_center(
        &self,
        user: AuthUser,
        id: Uuid,
        form: MultipartForm,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        update::update_edu_center(self, user, id, form, request).await
    }

    pub async fn get_edu_center(&self, id: Uuid, request: &HttpRequest) -> Result<HttpResponse> {
        get::get_edu_center(self, id, request).await
    }

    pub async fn list_edu_centers(
        &self,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        list::list_edu_centers(self, query, request).await
    }

    pub async fn delete_edu_center(
        &self,
        user: AuthUser,
        id: Uuid,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        delete::delete_edu_center(self, user, id, request).await
    }

    // 给教育中心评分
    pub async fn give_rating(
        &self,
        user: AuthUser,
        req: EduCenterRatingRequest,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        rating::give_rating(self, user, req, request).await
    }

    // 按距离查询教育中心
    pub async fn nearest(
        &self,
        query: LocationQuery,
        request: &HttpRequest,
    ) -> Result<HttpResponse> {
        location::nearest(self, query, request).await
    }
}
