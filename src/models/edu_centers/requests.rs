use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::{EduMatchError, Result};

const MAX_NAME_LEN: usize = 255;

// 联系方式更新，未提供的字段保持不变
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub instagram: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
}

// 创建教育中心请求（来自 multipart 表单的文本字段）
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEduCenterRequest {
    pub name: String,
    pub html_description: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact: super::entities::Contact,
}

// 更新教育中心请求，只更新提供的字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateEduCenterRequest {
    pub name: Option<String>,
    pub html_description: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: ContactPatch,
}

// 按距离查询教育中心
#[derive(Debug, Clone, Deserialize)]
pub struct LocationQuery {
    pub latitude: f64,
    #[serde(alias = "longtitude")]
    pub longitude: f64,
    /// 最大距离（公里），0 表示不限
    #[serde(default)]
    pub distance: f64,
    /// 0 表示不限
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn text(fields: &HashMap<String, String>, key: &str) -> Option<String> {
    fields.get(key).map(|v| v.trim().to_string())
}

fn number(fields: &HashMap<String, String>, key: &str, errors: &mut Vec<String>) -> Option<f64> {
    let raw = fields.get(key)?.trim();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            errors.push(format!("{key} must be a number"));
            None
        }
    }
}

fn check_coordinates(latitude: Option<f64>, longitude: Option<f64>, errors: &mut Vec<String>) {
    if let Some(lat) = latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        errors.push("latitude must be between -90 and 90".to_string());
    }
    if let Some(lon) = longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        errors.push("longitude must be between -180 and 180".to_string());
    }
}

fn check_name(name: &str, errors: &mut Vec<String>) {
    if name.is_empty() {
        errors.push("name is required".to_string());
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push(format!("name must be at most {MAX_NAME_LEN} characters"));
    }
}

impl CreateEduCenterRequest {
    /// 从表单字段构建并校验，所有不合法的字段一起返回
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self> {
        let mut errors = Vec::new();

        let name = text(fields, "name").unwrap_or_default();
        check_name(&name, &mut errors);

        let latitude = number(fields, "latitude", &mut errors);
        let longitude = number(fields, "longitude", &mut errors);
        if !fields.contains_key("latitude") {
            errors.push("latitude is required".to_string());
        }
        if !fields.contains_key("longitude") {
            errors.push("longitude is required".to_string());
        }
        check_coordinates(latitude, longitude, &mut errors);

        if !errors.is_empty() {
            return Err(EduMatchError::Validation(errors));
        }

        Ok(Self {
            name,
            html_description: text(fields, "html_description").unwrap_or_default(),
            address: text(fields, "address").unwrap_or_default(),
            latitude: latitude.unwrap_or_default(),
            longitude: longitude.unwrap_or_default(),
            contact: super::entities::Contact {
                instagram: text(fields, "instagram").unwrap_or_default(),
                telegram: text(fields, "telegram").unwrap_or_default(),
                website: text(fields, "website").unwrap_or_default(),
                phone_number: text(fields, "phone_number").unwrap_or_default(),
            },
        })
    }
}

impl UpdateEduCenterRequest {
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self> {
        let mut errors = Vec::new();

        let name = text(fields, "name");
        if let Some(name) = &name {
            check_name(name, &mut errors);
        }

        let latitude = number(fields, "latitude", &mut errors);
        let longitude = number(fields, "longitude", &mut errors);
        // 坐标必须成对更新
        if fields.contains_key("latitude") != fields.contains_key("longitude") {
            errors.push("latitude and longitude must be provided together".to_string());
        }
        check_coordinates(latitude, longitude, &mut errors);

        if !errors.is_empty() {
            return Err(EduMatchError::Validation(errors));
        }

        Ok(Self {
            name,
            html_description: text(fields, "html_description"),
            address: text(fields, "address"),
            latitude,
            longitude,
            contact: ContactPatch {
                instagram: text(fields, "instagram"),
                telegram: text(fields, "telegram"),
                website: text(fields, "website"),
                phone_number: text(fields, "phone_number"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_create_from_form() {
        let req = CreateEduCenterRequest::from_form(&form(&[
            ("name", " Najot Ta'lim "),
            ("latitude", "41.31"),
            ("longitude", "69.24"),
            ("telegram", "@najot"),
        ]))
        .unwrap();
        assert_eq!(req.name, "Najot Ta'lim");
        assert_eq!(req.latitude, 41.31);
        assert_eq!(req.contact.telegram, "@najot");
        assert_eq!(req.contact.instagram, "");
    }

    #[test]
    fn test_create_collects_all_errors() {
        let err = CreateEduCenterRequest::from_form(&form(&[("latitude", "95")])).unwrap_err();
        match err {
            EduMatchError::Validation(errors) => {
                assert!(errors.contains(&"name is required".to_string()));
                assert!(errors.contains(&"longitude is required".to_string()));
                assert!(errors.contains(&"latitude must be between -90 and 90".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_create_rejects_non_numeric_coordinates() {
        let err = CreateEduCenterRequest::from_form(&form(&[
            ("name", "Center"),
            ("latitude", "north"),
            ("longitude", "69"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            EduMatchError::Validation(vec!["latitude must be a number".to_string()])
        );
    }

    #[test]
    fn test_update_only_sets_present_fields() {
        let req = UpdateEduCenterRequest::from_form(&form(&[("address", "Chilonzor 9")])).unwrap();
        assert_eq!(req.address.as_deref(), Some("Chilonzor 9"));
        assert!(req.name.is_none());
        assert!(req.latitude.is_none());
        assert_eq!(req.contact, ContactPatch::default());
    }

    #[test]
    fn test_update_requires_coordinate_pair() {
        let err = UpdateEduCenterRequest::from_form(&form(&[("latitude", "41")])).unwrap_err();
        assert!(matches!(err, EduMatchError::Validation(_)));
        let err = UpdateEduCenterRequest::from_form(&form(&[("name", "  ")])).unwrap_err();
        assert_eq!(
            err,
            EduMatchError::Validation(vec!["name is required".to_string()])
        );
    }

    #[test]
    fn test_location_query_accepts_legacy_spelling() {
        let query: LocationQuery =
            serde_json::from_str(r#"{"latitude":41.3,"longtitude":69.2,"distance":5}"#).unwrap();
        assert_eq!(query.longitude, 69.2);
        assert_eq!(query.limit, 0);
        assert_eq!(query.offset, 0);
    }
}
