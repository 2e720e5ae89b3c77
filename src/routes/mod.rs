pub mod auth;

pub mod users;

pub mod edu_centers;

pub mod courses;

pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use edu_centers::configure_edu_center_routes;
pub use users::configure_user_routes;

use actix_web::{HttpRequest, web};

use crate::config::UploadConfig;
use crate::errors::{EduMatchError, Result};

// multipart 表单的大小限制
fn upload_config(req: &HttpRequest) -> Result<web::Data<UploadConfig>> {
    req.app_data::<web::Data<UploadConfig>>()
        .cloned()
        .ok_or_else(|| EduMatchError::internal("UploadConfig not found in app data"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{
        App,
        http::{
            StatusCode,
            header::{AUTHORIZATION, CONTENT_TYPE},
        },
        test, web,
    };
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::*;
    use crate::cache::{MokaCacheWrapper, ObjectCache};
    use crate::config::{CacheConfig, JwtConfig, UploadConfig};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use crate::utils::jwt::JwtUtils;
    use crate::utils::{ImageStore, json_error_handler, query_error_handler};

    const BOUNDARY: &str = "edumatch-boundary";

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    fn multipart_body(fields: &[(&str, &str)]) -> Vec<u8> {
        multipart_with_file(fields, None)
    }

    fn multipart_with_file(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((name, filename, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    macro_rules! app {
        () => {{
            let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
            let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(&CacheConfig {
                default_ttl: 60,
                max_capacity: 100,
            }));
            let upload = UploadConfig {
                dir: std::env::temp_dir()
                    .join(format!("edumatch-{}", Uuid::new_v4()))
                    .to_string_lossy()
                    .to_string(),
                max_size: 1024 * 1024,
                max_field_size: 1024,
            };
            let jwt = JwtUtils::new(&JwtConfig {
                secret: "access-secret".to_string(),
                refresh_secret: "refresh-secret".to_string(),
                access_token_expiry: 24,
                refresh_token_expiry: 720,
                check_user_exists: true,
            });
            test::init_service(
                App::new()
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(web::Data::new(storage))
                    .app_data(web::Data::new(cache))
                    .app_data(web::Data::new(jwt))
                    .app_data(web::Data::new(ImageStore::new(&upload)))
                    .app_data(web::Data::new(upload))
                    .configure(configure_auth_routes)
                    .configure(configure_user_routes)
                    .configure(configure_edu_center_routes)
                    .configure(configure_course_routes),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_signup_login_and_me() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({
                "first_name": "Bekzod",
                "last_name": "Tursunov",
                "username": "bekzod",
                "password": "Secur3Pass"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let signup: Value = test::read_body_json(resp).await;
        assert!(signup["user"].get("password_hash").is_none());

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"username": "bekzod", "password": "wrongPass1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "wrong password provided");

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"username": "bekzod", "password": "Secur3Pass"}))
            .to_request();
        let login: Value = test::call_and_read_body_json(&app, req).await;
        let access = login["access_token"].as_str().unwrap().to_string();
        let refresh = login["refresh_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((AUTHORIZATION, format!("Bearer {access}")))
            .to_request();
        let me: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me["user"]["username"], "bekzod");

        // refresh token 不能当作 access token 使用
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((AUTHORIZATION, format!("Bearer {refresh}")))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/refresh")
            .set_json(json!({"refresh_token": refresh}))
            .to_request();
        let refreshed: Value = test::call_and_read_body_json(&app, req).await;
        assert!(refreshed["access_token"].as_str().is_some());

        let req = test::TestRequest::post()
            .uri("/api/auth/refresh")
            .insert_header((AUTHORIZATION, format!("Bearer {access}")))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_edu_center_routes() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({
                "first_name": "Nodira",
                "last_name": "Saidova",
                "username": "nodira",
                "password": "Secur3Pass"
            }))
            .to_request();
        let signup: Value = test::call_and_read_body_json(&app, req).await;
        let token = signup["access_token"].as_str().unwrap().to_string();

        // 列表公开，创建需要登录
        let req = test::TestRequest::get().uri("/api/educenters/").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let body = multipart_body(&[
            ("name", "Najot Talim"),
            ("latitude", "41.3275"),
            ("longitude", "69.2817"),
            ("instagram", "najot.talim"),
        ]);
        let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
        let req = test::TestRequest::post()
            .uri("/api/educenters/")
            .insert_header((CONTENT_TYPE, content_type.clone()))
            .set_payload(body.clone())
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::post()
            .uri(&format!("/api/educenters/?token={token}"))
            .insert_header((CONTENT_TYPE, content_type.clone()))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let center: Value = test::read_body_json(resp).await;
        assert_eq!(center["contacts"]["instagram"], "najot.talim");
        assert_eq!(center["rating"], 0.0);
        let id = center["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/educenters/rating")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .set_json(json!({"score": 4, "edu_center_id": id}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::post()
            .uri("/api/educenters/location")
            .set_json(json!({"latitude": 41.3111, "longtitude": 69.2797, "distance": 10.0}))
            .to_request();
        let located: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(located["total"], 1);
        assert_eq!(located["educenters"][0]["rating"], 4.0);
        assert!(located["educenters"][0]["distance"].as_f64().unwrap() < 10.0);

        let req = test::TestRequest::get()
            .uri("/api/educenters/not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid id provided");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/educenters/{id}"))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/educenters/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "education center not found");
    }

    #[actix_web::test]
    async fn test_user_routes_and_payload_errors() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({
                "first_name": "Kamola",
                "last_name": "Yusupova",
                "username": "kamola",
                "password": "Secur3Pass"
            }))
            .to_request();
        let signup: Value = test::call_and_read_body_json(&app, req).await;
        let token = signup["access_token"].as_str().unwrap().to_string();
        let user_id = signup["user"]["id"].as_str().unwrap().to_string();

        // 普通用户不能列出用户
        let req = test::TestRequest::get()
            .uri("/api/users/")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid request payload");

        let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
        let req = test::TestRequest::patch()
            .uri("/api/users/")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .insert_header((CONTENT_TYPE, content_type.clone()))
            .set_payload(multipart_with_file(
                &[("first_name", "Kamila")],
                Some(("avatar", "me.png", PNG)),
            ))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["user"]["first_name"], "Kamila");
        assert!(updated["user"]["avatar"].as_str().unwrap().ends_with(".png"));

        // 文本字段超过 max_field_size
        let long_name = "a".repeat(2048);
        let req = test::TestRequest::patch()
            .uri("/api/users/")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .insert_header((CONTENT_TYPE, content_type))
            .set_payload(multipart_body(&[("last_name", long_name.as_str())]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            "validation failed: last_name must not exceed 1024 bytes"
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/api/users/{user_id}"))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "user no longer exist");
    }
}
