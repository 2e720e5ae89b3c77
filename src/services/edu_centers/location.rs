use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse};

use super::EduCenterService;
use crate::errors::{EduMatchError, Result};
use crate::models::edu_centers::{
    requests::LocationQuery,
    responses::{EduCenterWithDistance, LocationResponse},
};
use crate::utils::geo::{NearestQuery, nearest as rank_nearest};

fn validate_query(query: &LocationQuery) -> Result<()> {
    let mut errors = Vec::new();
    if !(-90.0..=90.0).contains(&query.latitude) {
        errors.push("latitude must be between -90 and 90".to_string());
    }
    if !(-180.0..=180.0).contains(&query.longitude) {
        errors.push("longitude must be between -180 and 180".to_string());
    }
    if !query.distance.is_finite() || query.distance < 0.0 {
        errors.push("distance must not be negative".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(EduMatchError::Validation(errors))
    }
}

/// 按距离升序返回教育中心，距离为 0 时不限范围
pub async fn nearest(
    service: &EduCenterService,
    query: LocationQuery,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    validate_query(&query)?;

    let points = storage.list_edu_center_points().await?;
    let ranked = rank_nearest(
        &points,
        &NearestQuery {
            latitude: query.latitude,
            longitude: query.longitude,
            max_distance_km: query.distance,
            limit: query.limit,
            offset: query.offset,
        },
    );

    let ids: Vec<_> = ranked.matches.iter().map(|(id, _)| *id).collect();
    let mut centers: HashMap<_, _> = storage
        .get_edu_centers_by_ids(&ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    // 保持距离顺序；两次读取之间被删除的中心直接跳过
    let educenters = ranked
        .matches
        .into_iter()
        .filter_map(|(id, distance)| {
            centers
                .remove(&id)
                .map(|edu_center| EduCenterWithDistance {
                    edu_center,
                    distance,
                })
        })
        .collect();

    Ok(HttpResponse::Ok().json(LocationResponse {
        educenters,
        total: ranked.total,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::body::MessageBody;

    use super::super::test_support::*;
    use super::*;
    use crate::storage::Storage;

    fn query(distance: f64, limit: u64, offset: u64) -> LocationQuery {
        LocationQuery {
            latitude: 41.3111,
            longitude: 69.2797,
            distance,
            limit,
            offset,
        }
    }

    async fn call(service: &EduCenterService, q: LocationQuery) -> serde_json::Value {
        let resp = service.nearest(q, &http_request()).await.unwrap();
        let body = resp.into_body().try_into_bytes().unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_nearest_orders_and_filters() {
        let (storage, user) = storage_with_user().await;
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let service = EduCenterService::new(storage.clone(), temp_images());

        for (name, lat, lon) in [
            ("Samarkand Center", "39.6542", "66.9597"),
            ("Tashkent Center", "41.3111", "69.2797"),
            ("Chirchiq Center", "41.4689", "69.5822"),
        ] {
            service
                .create_edu_center(
                    user,
                    form(&[("name", name), ("latitude", lat), ("longitude", lon)], None),
                    &http_request(),
                )
                .await
                .unwrap();
        }

        let all = call(&service, query(0.0, 0, 0)).await;
        assert_eq!(all["total"], 3);
        let names: Vec<_> = all["educenters"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Tashkent Center", "Chirchiq Center", "Samarkand Center"]
        );
        assert_eq!(all["educenters"][0]["distance"], 0.0);

        let near = call(&service, query(50.0, 0, 0)).await;
        assert_eq!(near["total"], 2);
        assert!(
            near["educenters"]
                .as_array()
                .unwrap()
                .iter()
                .all(|c| c["distance"].as_f64().unwrap() <= 50.0)
        );

        let page = call(&service, query(0.0, 1, 1)).await;
        assert_eq!(page["total"], 3);
        assert_eq!(page["educenters"][0]["name"], "Chirchiq Center");
    }

    #[tokio::test]
    async fn test_invalid_coordinates() {
        let (storage, _) = storage_with_user().await;
        let service = EduCenterService::new(Arc::new(storage), temp_images());
        let mut q = query(-1.0, 0, 0);
        q.latitude = 120.0;
        match service.nearest(q, &http_request()).await.unwrap_err() {
            EduMatchError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
