use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::EduCenterService;
use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::MessageResponse;
use crate::models::ratings::{EduCenterRatingRequest, RatingTarget, validate_score};

/// 记录一条评分，平均分在读取时计算
pub async fn give_rating(
    service: &EduCenterService,
    user: AuthUser,
    req: EduCenterRatingRequest,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    validate_score(req.score)?;

    // 已软删除的教育中心不能评分
    storage
        .get_edu_center_by_id(req.edu_center_id)
        .await?
        .ok_or(EduMatchError::EduCenterNotFound)?;

    storage
        .create_rating(user.id, RatingTarget::EduCenter(req.edu_center_id), req.score)
        .await?;
    info!(
        "User {} rated EduCenter {} with {}",
        user.id, req.edu_center_id, req.score
    );

    Ok(HttpResponse::Created().json(MessageResponse::new("rating created")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::super::test_support::*;
    use super::*;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_rating_is_reflected_on_next_read() {
        let (storage, user) = storage_with_user().await;
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let service = EduCenterService::new(storage.clone(), temp_images());

        service
            .create_edu_center(
                user,
                form(&[("name", "PDP"), ("latitude", "41.3"), ("longitude", "69.2")], None),
                &http_request(),
            )
            .await
            .unwrap();
        let id = storage.list_edu_center_points().await.unwrap()[0].id;

        for score in [5, 4] {
            service
                .give_rating(
                    user,
                    EduCenterRatingRequest {
                        score,
                        edu_center_id: id,
                    },
                    &http_request(),
                )
                .await
                .unwrap();
        }
        let center = storage.get_edu_center_by_id(id).await.unwrap().unwrap();
        assert_eq!(center.rating, 4.5);
    }

    #[tokio::test]
    async fn test_rating_out_of_range_is_rejected() {
        let (storage, user) = storage_with_user().await;
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let service = EduCenterService::new(storage.clone(), temp_images());

        service
            .create_edu_center(
                user,
                form(&[("name", "Mars IT"), ("latitude", "41.3"), ("longitude", "69.2")], None),
                &http_request(),
            )
            .await
            .unwrap();
        let id = storage.list_edu_center_points().await.unwrap()[0].id;

        for score in [-1, 6] {
            let err = service
                .give_rating(
                    user,
                    EduCenterRatingRequest {
                        score,
                        edu_center_id: id,
                    },
                    &http_request(),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, EduMatchError::Validation(_)));
        }
        let center = storage.get_edu_center_by_id(id).await.unwrap().unwrap();
        assert_eq!(center.rating, 0.0);

        let err = service
            .give_rating(
                user,
                EduCenterRatingRequest {
                    score: 3,
                    edu_center_id: Uuid::new_v4(),
                },
                &http_request(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, EduMatchError::EduCenterNotFound);
    }
}
