use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{EduMatchError, Result};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize)]
pub struct CourseListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub edu_center_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub teacher: String,
    pub edu_center_id: Uuid,
}

// 更新课程请求，ID 放在请求体中
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourseRequest {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub teacher: Option<String>,
}

fn check_name(name: &str, errors: &mut Vec<String>) {
    if name.trim().is_empty() {
        errors.push("name is required".to_string());
    } else if name.chars().count() > 255 {
        errors.push("name must be at most 255 characters".to_string());
    }
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        check_name(&self.name, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(EduMatchError::Validation(errors))
        }
    }
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(EduMatchError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        let req: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "name": " ",
            "edu_center_id": Uuid::new_v4(),
        }))
        .unwrap();
        assert_eq!(
            req.validate(),
            Err(EduMatchError::Validation(vec!["name is required".to_string()]))
        );
    }

    #[test]
    fn test_update_without_name_is_valid() {
        let req: UpdateCourseRequest = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "teacher": "Aziz",
        }))
        .unwrap();
        assert!(req.validate().is_ok());
    }
}
