use actix_web::{HttpRequest, HttpResponse};
use tracing::info;
use uuid::Uuid;

use super::UserService;
use crate::cache::user_key;
use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::MessageResponse;
use crate::services::{cache_from, ensure_owner};

/// 软删除用户，只有本人或管理员可以操作
pub async fn delete_user(
    service: &UserService,
    user: AuthUser,
    user_id: Uuid,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    ensure_owner(&user, user_id)?;

    if !storage.delete_user(user_id).await? {
        return Err(EduMatchError::UserNotFound);
    }

    // 让中间件的存在性检查立即生效
    if let Some(cache) = cache_from(request) {
        cache.remove(&user_key(user_id)).await;
    }
    info!("User {} deleted by {}", user_id, user.id);

    Ok(HttpResponse::Ok().json(MessageResponse::new("user deleted")))
}
