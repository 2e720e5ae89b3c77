use actix_web::{HttpRequest, HttpResponse};
use tracing::info;
use uuid::Uuid;

use super::EduCenterService;
use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::edu_centers::requests::UpdateEduCenterRequest;
use crate::services::{discard_image, ensure_owner};
use crate::utils::multipart::MultipartForm;

/// 更新教育中心
///
/// 未上传新封面时保留原封面；联系方式原地更新。
/// 新封面在事务失败时删除，事务提交后删除被替换的旧封面。
pub async fn update_edu_center(
    service: &EduCenterService,
    user: AuthUser,
    id: Uuid,
    form: MultipartForm,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let images = service.get_image_store(request)?;

    let req = UpdateEduCenterRequest::from_form(&form.fields)?;

    let existing = storage
        .get_edu_center_by_id(id)
        .await?
        .ok_or(EduMatchError::EduCenterNotFound)?;
    ensure_owner(&user, existing.owner_id)?;

    let cover = form.image.as_ref().map(|image| images.save(image)).transpose()?;

    let updated = storage
        .update_edu_center(id, req, cover.clone())
        .await
        .and_then(|center| center.ok_or(EduMatchError::EduCenterNotFound))
        .inspect_err(|_| {
            if let Some(name) = &cover {
                discard_image(&images, name);
            }
        })?;

    if cover.is_some()
        && let Some(old) = existing.cover_image.as_deref()
    {
        discard_image(&images, old);
    }
    info!("EduCenter {} updated by {}", id, user.id);

    Ok(HttpResponse::Ok().json(updated))
}
