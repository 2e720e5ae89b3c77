use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use uuid::Uuid;

use crate::errors::EduMatchError;

/// 路径参数 `{id}` 的 UUID 提取器，格式错误时返回 `InvalidId`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeUuid(pub Uuid);

impl FromRequest for SafeUuid {
    type Error = EduMatchError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.match_info()
                .get("id")
                .and_then(|id| Uuid::parse_str(id).ok())
                .map(SafeUuid)
                .ok_or(EduMatchError::InvalidId),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    async fn echo(id: SafeUuid) -> HttpResponse {
        HttpResponse::Ok().body(id.0.to_string())
    }

    #[actix_web::test]
    async fn test_safe_uuid() {
        let app = test::init_service(App::new().route("/items/{id}", web::get().to(echo))).await;

        let id = Uuid::new_v4();
        let req = test::TestRequest::get()
            .uri(&format!("/items/{id}"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, id.to_string());

        let req = test::TestRequest::get().uri("/items/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
