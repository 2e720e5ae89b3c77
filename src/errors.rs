//! 统一错误处理模块
//!
//! 使用宏生成领域错误类型，每种错误绑定固定的 HTTP 状态码与对外消息。
//! 所有处理函数返回 `Result<HttpResponse, EduMatchError>`，由 `ResponseError`
//! 统一渲染为 `{"error": "<message>"}`。

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义（领域错误 + 固定的内部错误）
/// - status() 方法 - 返回 HTTP 状态码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回对外消息
macro_rules! define_edumatch_errors {
    ($(
        $variant:ident($status:ident, $type_name:literal, $message:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum EduMatchError {
            $($variant,)*
            /// 字段级校验错误列表
            Validation(Vec<String>),
            Database(String),
            FileOperation(String),
            Config(String),
            Internal(String),
        }

        impl EduMatchError {
            /// 获取 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(EduMatchError::$variant => StatusCode::$status,)*
                    EduMatchError::Validation(_) => StatusCode::BAD_REQUEST,
                    EduMatchError::Database(_)
                    | EduMatchError::FileOperation(_)
                    | EduMatchError::Config(_)
                    | EduMatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduMatchError::$variant => $type_name,)*
                    EduMatchError::Validation(_) => "Validation Error",
                    EduMatchError::Database(_) => "Database Error",
                    EduMatchError::FileOperation(_) => "File Operation Error",
                    EduMatchError::Config(_) => "Configuration Error",
                    EduMatchError::Internal(_) => "Internal Error",
                }
            }

            /// 获取对外消息，内部错误不暴露细节
            pub fn message(&self) -> String {
                match self {
                    $(EduMatchError::$variant => $message.to_string(),)*
                    EduMatchError::Validation(errors) => {
                        format!("validation failed: {}", errors.join(", "))
                    }
                    _ => "Internal Server Error".to_string(),
                }
            }
        }
    };
}

define_edumatch_errors! {
    InvalidRequestPayload(BAD_REQUEST, "Invalid Request", "invalid request payload"),
    InvalidId(BAD_REQUEST, "Invalid ID", "invalid id provided"),
    EduCenterExists(BAD_REQUEST, "EduCenter Conflict", "education center already exist"),
    EduCenterNotFound(NOT_FOUND, "EduCenter Not Found", "education center not found"),
    UserExists(BAD_REQUEST, "User Conflict", "user already exists"),
    UserNotFound(NOT_FOUND, "User Not Found", "user not found"),
    WrongPassword(BAD_REQUEST, "Authentication Error", "wrong password provided"),
    UserNoLongerExist(UNAUTHORIZED, "Authentication Error", "user no longer exist"),
    CourseExists(BAD_REQUEST, "Course Conflict", "course is exists"),
    CourseNotFound(NOT_FOUND, "Course Not Found", "course not found"),
    InvalidToken(UNAUTHORIZED, "Authentication Error", "invalid token"),
    Unauthorized(UNAUTHORIZED, "Authorization Error", "unauthorized"),
}

impl EduMatchError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        EduMatchError::Validation(vec![msg.into()])
    }

    pub fn database<T: Into<String>>(msg: T) -> Self {
        EduMatchError::Database(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        EduMatchError::FileOperation(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        EduMatchError::Internal(msg.into())
    }

    /// 是否为服务端内部错误
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }

    /// 日志用的完整描述（包含内部细节）
    pub fn detail(&self) -> String {
        match self {
            EduMatchError::Database(msg)
            | EduMatchError::FileOperation(msg)
            | EduMatchError::Config(msg)
            | EduMatchError::Internal(msg) => format!("{}: {}", self.error_type(), msg),
            _ => format!("{}: {}", self.error_type(), self.message()),
        }
    }
}

impl fmt::Display for EduMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail())
    }
}

impl std::error::Error for EduMatchError {}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ResponseError for EduMatchError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorBody {
            error: self.message(),
        })
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EduMatchError {
    fn from(err: sea_orm::DbErr) -> Self {
        EduMatchError::Database(err.to_string())
    }
}

impl From<std::io::Error> for EduMatchError {
    fn from(err: std::io::Error) -> Self {
        EduMatchError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EduMatchError {
    fn from(err: serde_json::Error) -> Self {
        EduMatchError::Internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for EduMatchError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        EduMatchError::InvalidToken
    }
}

impl From<config::ConfigError> for EduMatchError {
    fn from(err: config::ConfigError) -> Self {
        EduMatchError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduMatchError>;
