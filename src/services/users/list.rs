use actix_web::{HttpRequest, HttpResponse};

use super::UserService;
use crate::errors::Result;
use crate::models::users::requests::{UserListParams, UserListQuery};

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    query.pagination.validate()?;

    let list_query = UserListQuery {
        page: query.pagination.page,
        size: query.pagination.size,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    let response = storage.list_users_with_pagination(list_query).await?;
    Ok(HttpResponse::Ok().json(response))
}
