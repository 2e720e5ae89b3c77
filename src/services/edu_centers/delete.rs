use actix_web::{HttpRequest, HttpResponse};
use tracing::info;
use uuid::Uuid;

use super::EduCenterService;
use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::MessageResponse;
use crate::services::ensure_owner;

/// 软删除教育中心，封面文件保留
pub async fn delete_edu_center(
    service: &EduCenterService,
    user: AuthUser,
    id: Uuid,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;

    let center = storage
        .get_edu_center_by_id(id)
        .await?
        .ok_or(EduMatchError::EduCenterNotFound)?;
    ensure_owner(&user, center.owner_id)?;

    if !storage.delete_edu_center(id).await? {
        return Err(EduMatchError::EduCenterNotFound);
    }
    info!("EduCenter {} deleted by {}", id, user.id);

    Ok(HttpResponse::Ok().json(MessageResponse::new("education center deleted")))
}
