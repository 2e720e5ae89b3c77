use actix_web::{HttpRequest, HttpResponse};

use super::EduCenterService;
use crate::errors::Result;
use crate::models::PaginationQuery;

pub async fn list_edu_centers(
    service: &EduCenterService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    query.validate()?;
    let response = storage.list_edu_centers_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(response))
}
