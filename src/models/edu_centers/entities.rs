use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 联系方式，与教育中心一对一
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub instagram: String,
    pub telegram: String,
    pub website: String,
    pub phone_number: String,
}

// 教育中心实体，rating 为读取时计算的平均分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EduCenter {
    pub id: Uuid,
    pub name: String,
    pub html_description: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    pub cover_image: Option<String>,
    pub rating: f64,
    #[serde(rename = "contacts")]
    pub contact: Contact,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 地理查询使用的坐标点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
}
