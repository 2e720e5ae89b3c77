//! 球面距离计算与按距离排序

use uuid::Uuid;

use crate::models::edu_centers::entities::GeoPoint;

/// 地球半径（公里）
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 两点间的大圆距离（公里），使用球面余弦公式
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon2 - lon1).cos();
    // 浮点误差可能让参数略微越界
    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}

/// 距离查询条件
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// 0 表示不限距离
    pub max_distance_km: f64,
    /// 0 表示不限条数
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearestResult {
    /// 当前页的 (ID, 距离)，按距离升序
    pub matches: Vec<(Uuid, f64)>,
    /// 过滤后、分页前的总数
    pub total: u64,
}

/// 计算距离，过滤、排序后再分页
pub fn nearest(points: &[GeoPoint], query: &NearestQuery) -> NearestResult {
    let mut ranked: Vec<(Uuid, f64)> = points
        .iter()
        .map(|p| {
            (
                p.id,
                haversine_km(query.latitude, query.longitude, p.latitude, p.longitude),
            )
        })
        .filter(|(_, distance)| query.max_distance_km <= 0.0 || *distance <= query.max_distance_km)
        .collect();

    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let total = ranked.len() as u64;
    let limit = if query.limit == 0 {
        usize::MAX
    } else {
        query.limit as usize
    };
    let matches = ranked
        .into_iter()
        .skip(query.offset as usize)
        .take(limit)
        .collect();

    NearestResult { matches, total }
}
