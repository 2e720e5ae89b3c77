use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::UserService;
use crate::cache::user_key;
use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::users::{requests::UpdateUserRequest, responses::UserResponse};
use crate::services::{cache_from, discard_image};
use crate::utils::multipart::MultipartForm;
use crate::utils::validate::validate_user_update;

/// 用户只能修改自己的资料
///
/// 新头像在写库失败时删除，写库成功后删除被替换的旧头像。
pub async fn update_user(
    service: &UserService,
    user: AuthUser,
    form: MultipartForm,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let images = service.get_image_store(request)?;

    let mut update_data = UpdateUserRequest::from_form(&form.fields);
    validate_user_update(&update_data)?;

    let existing = storage
        .get_user_by_id(user.id)
        .await?
        .ok_or(EduMatchError::UserNotFound)?;

    let avatar = form.image.as_ref().map(|image| images.save(image)).transpose()?;
    update_data.avatar = avatar.clone();

    let updated = storage
        .update_user(user.id, update_data)
        .await
        .and_then(|updated| updated.ok_or(EduMatchError::UserNotFound))
        .inspect_err(|_| {
            if let Some(name) = &avatar {
                discard_image(&images, name);
            }
        })?;

    if avatar.is_some()
        && let Some(old) = existing.avatar.as_deref()
    {
        discard_image(&images, old);
    }
    if let Some(cache) = cache_from(request) {
        cache.remove(&user_key(user.id)).await;
    }
    info!("User {} updated profile", updated.username);

    Ok(HttpResponse::Ok().json(UserResponse { user: updated }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{body::MessageBody, http::StatusCode};

    use super::*;
    use crate::models::users::{entities::{User, UserRole}, requests::CreateUserRequest};
    use crate::services::edu_centers::test_support::*;
    use crate::storage::Storage;

    async fn read_user(resp: HttpResponse) -> User {
        let body = resp.into_body().try_into_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        serde_json::from_value(json["user"].clone()).unwrap()
    }

    #[tokio::test]
    async fn test_avatar_replaces_previous_file() {
        let (storage, user) = storage_with_user().await;
        let images = temp_images();
        let service = UserService::new(Arc::new(storage), images.clone());

        let resp = service
            .update_user(user, form(&[("first_name", "Dilbar")], Some(png())), &http_request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = read_user(resp).await;
        assert_eq!(updated.first_name, "Dilbar");
        let first_avatar = updated.avatar.unwrap();
        assert!(images.path(&first_avatar).exists());

        // 只改资料时保留头像
        let updated = read_user(
            service
                .update_user(user, form(&[("last_name", "Karimova")], None), &http_request())
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(updated.avatar.as_deref(), Some(first_avatar.as_str()));

        let updated = read_user(
            service
                .update_user(user, form(&[], Some(png())), &http_request())
                .await
                .unwrap(),
        )
        .await;
        let second_avatar = updated.avatar.unwrap();
        assert_ne!(second_avatar, first_avatar);
        assert!(!images.path(&first_avatar).exists());
        assert_eq!(files_in(&images), 1);
    }

    #[tokio::test]
    async fn test_failed_update_removes_new_avatar() {
        let (storage, user) = storage_with_user().await;
        storage
            .create_user(CreateUserRequest {
                first_name: "Sardor".to_string(),
                last_name: "Umarov".to_string(),
                username: "sardor".to_string(),
                email: None,
                password_hash: "hash".to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let images = temp_images();
        let service = UserService::new(storage.clone(), images.clone());

        let first_avatar = read_user(
            service
                .update_user(user, form(&[], Some(png())), &http_request())
                .await
                .unwrap(),
        )
        .await
        .avatar
        .unwrap();

        let err = service
            .update_user(user, form(&[("username", "sardor")], Some(png())), &http_request())
            .await
            .unwrap_err();
        assert_eq!(err, EduMatchError::UserExists);

        // 新头像被删除，原头像保留
        assert_eq!(files_in(&images), 1);
        assert!(images.path(&first_avatar).exists());
        let current = storage.get_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(current.username, "dilnoza");
        assert_eq!(current.avatar.as_deref(), Some(first_avatar.as_str()));
    }

    #[tokio::test]
    async fn test_invalid_profile_writes_nothing() {
        let (storage, user) = storage_with_user().await;
        let images = temp_images();
        let service = UserService::new(Arc::new(storage), images.clone());

        let err = service
            .update_user(user, form(&[("username", "x")], Some(png())), &http_request())
            .await
            .unwrap_err();
        assert!(matches!(err, EduMatchError::Validation(_)));
        assert_eq!(files_in(&images), 0);
    }
}
