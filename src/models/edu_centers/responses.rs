use serde::Serialize;

use super::entities::EduCenter;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct EduCenterListResponse {
    pub items: Vec<EduCenter>,
    pub pagination: PaginationInfo,
}

// 带距离的教育中心
#[derive(Debug, Serialize)]
pub struct EduCenterWithDistance {
    #[serde(flatten)]
    pub edu_center: EduCenter,
    pub distance: f64,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub educenters: Vec<EduCenterWithDistance>,
    pub total: u64,
}
