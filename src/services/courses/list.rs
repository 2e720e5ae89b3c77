use actix_web::{HttpRequest, HttpResponse};

use super::CourseService;
use crate::errors::Result;
use crate::models::courses::requests::CourseListParams;

pub async fn list_courses(
    service: &CourseService,
    query: CourseListParams,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    query.pagination.validate()?;
    let response = storage
        .list_courses_with_pagination(query.pagination, query.edu_center_id)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
