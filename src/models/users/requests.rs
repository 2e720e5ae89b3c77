use std::collections::HashMap;

use super::entities::UserRole;
use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 新用户（密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
}

// 用户资料更新请求（来自 multipart 表单），只更新提供的字段
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    /// 空字符串表示清除邮箱
    pub email: Option<String>,
    /// 已保存的头像文件名，由服务层填入
    pub avatar: Option<String>,
}

impl UpdateUserRequest {
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        let text = |key: &str| fields.get(key).map(|v| v.trim().to_string());
        Self {
            first_name: text("first_name"),
            last_name: text("last_name"),
            username: text("username"),
            email: text("email"),
            avatar: None,
        }
    }
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub page: i64,
    pub size: i64,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_from_form_keeps_only_present_fields() {
        let fields = HashMap::from([
            ("first_name".to_string(), " Kamila ".to_string()),
            ("email".to_string(), String::new()),
            ("avatar_url".to_string(), "x.png".to_string()),
        ]);
        let req = UpdateUserRequest::from_form(&fields);
        assert_eq!(req.first_name.as_deref(), Some("Kamila"));
        assert_eq!(req.email.as_deref(), Some(""));
        assert!(req.last_name.is_none());
        assert!(req.username.is_none());
        assert!(req.avatar.is_none());
    }
}
