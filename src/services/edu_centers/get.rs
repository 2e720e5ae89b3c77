use actix_web::{HttpRequest, HttpResponse};
use uuid::Uuid;

use super::EduCenterService;
use crate::errors::{EduMatchError, Result};

pub async fn get_edu_center(
    service: &EduCenterService,
    id: Uuid,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let center = storage
        .get_edu_center_by_id(id)
        .await?
        .ok_or(EduMatchError::EduCenterNotFound)?;
    Ok(HttpResponse::Ok().json(center))
}
