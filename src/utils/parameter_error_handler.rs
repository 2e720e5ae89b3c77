use actix_web::{HttpRequest, error};

use crate::errors::EduMatchError;

/// JSON 请求体解析失败
pub fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> error::Error {
    tracing::debug!("JSON 解析失败 {} {}: {}", req.method(), req.path(), err);
    EduMatchError::InvalidRequestPayload.into()
}

/// 查询参数解析失败
pub fn query_error_handler(err: error::QueryPayloadError, req: &HttpRequest) -> error::Error {
    tracing::debug!("查询参数解析失败 {} {}: {}", req.method(), req.path(), err);
    EduMatchError::InvalidRequestPayload.into()
}
