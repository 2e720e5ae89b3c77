pub mod auth;
pub mod courses;
pub mod edu_centers;
pub mod users;

use std::sync::Arc;

use actix_web::{HttpRequest, web};
use tracing::warn;
use uuid::Uuid;

use crate::cache::ObjectCache;
use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::storage::Storage;
use crate::utils::ImageStore;
use crate::utils::jwt::JwtUtils;

pub use auth::AuthService;
pub use courses::CourseService;
pub use edu_centers::EduCenterService;
pub use users::UserService;

// 从 app_data 中取出共享组件，缺失时属于启动配置错误

pub(crate) fn storage_from(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| EduMatchError::internal("Storage not found in app data"))
}

pub(crate) fn jwt_from(request: &HttpRequest) -> Result<web::Data<JwtUtils>> {
    request
        .app_data::<web::Data<JwtUtils>>()
        .cloned()
        .ok_or_else(|| EduMatchError::internal("JwtUtils not found in app data"))
}

pub(crate) fn image_store_from(request: &HttpRequest) -> Result<web::Data<ImageStore>> {
    request
        .app_data::<web::Data<ImageStore>>()
        .cloned()
        .ok_or_else(|| EduMatchError::internal("ImageStore not found in app data"))
}

pub(crate) fn cache_from(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone())
}

/// 删除不再引用的图片，失败只记录日志
pub(crate) fn discard_image(images: &ImageStore, name: &str) {
    if let Err(e) = images.delete(name) {
        warn!("Failed to remove image {}: {}", name, e.detail());
    }
}

/// 调用者必须是资源所有者或管理员
pub(crate) fn ensure_owner(user: &AuthUser, owner_id: Uuid) -> Result<()> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    } else {
        Err(EduMatchError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    #[test]
    fn test_ensure_owner() {
        let owner = Uuid::new_v4();
        let caller = AuthUser {
            id: owner,
            role: UserRole::User,
        };
        assert!(ensure_owner(&caller, owner).is_ok());

        let stranger = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::User,
        };
        assert_eq!(
            ensure_owner(&stranger, owner),
            Err(EduMatchError::Unauthorized)
        );

        let admin = AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Admin,
        };
        assert!(ensure_owner(&admin, owner).is_ok());
    }
}
