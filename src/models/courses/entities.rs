use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 课程实体，rating 为读取时计算的平均分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub teacher: String,
    pub edu_center_id: Uuid,
    pub rating: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
