//! 统一记录错误响应

use actix_web::{
    Result,
    dev::ServiceResponse,
    middleware::{ErrorHandlerResponse, ErrorHandlers},
};
use tracing::{error, warn};

use crate::errors::EduMatchError;

/// 记录所有 4xx/5xx 响应的 method、path、status 与错误详情
pub fn log_error_response<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let method = res.request().method().clone();
    let path = res.request().path().to_string();

    // 内部错误只在日志中输出详情
    let detail = res
        .response()
        .error()
        .map(|err| match err.as_error::<EduMatchError>() {
            Some(app_err) => app_err.detail(),
            None => err.to_string(),
        })
        .unwrap_or_default();

    if status.is_server_error() {
        error!(%method, %path, status = status.as_u16(), "{detail}");
    } else {
        warn!(%method, %path, status = status.as_u16(), "{detail}");
    }

    Ok(ErrorHandlerResponse::Response(res.map_into_left_body()))
}

pub fn error_logger<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(log_error_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    async fn missing() -> std::result::Result<HttpResponse, EduMatchError> {
        Err(EduMatchError::CourseNotFound)
    }

    async fn broken() -> std::result::Result<HttpResponse, EduMatchError> {
        Err(EduMatchError::database("connection reset"))
    }

    #[actix_web::test]
    async fn test_error_responses_pass_through() {
        let app = test::init_service(
            App::new()
                .wrap(error_logger())
                .route("/missing", web::get().to(missing))
                .route("/broken", web::get().to(broken)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "course not found");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/broken").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Internal Server Error");
    }
}
