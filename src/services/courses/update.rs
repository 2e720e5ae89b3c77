use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::{CourseService, ensure_center_owner};
use crate::errors::{EduMatchError, Result};
use crate::middlewares::AuthUser;
use crate::models::courses::requests::UpdateCourseRequest;

pub async fn update_course(
    service: &CourseService,
    user: AuthUser,
    req: UpdateCourseRequest,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    req.validate()?;

    let existing = storage
        .get_course_by_id(req.id)
        .await?
        .ok_or(EduMatchError::CourseNotFound)?;
    ensure_center_owner(&storage, &user, existing.edu_center_id).await?;

    let course = storage
        .update_course(req)
        .await?
        .ok_or(EduMatchError::CourseNotFound)?;
    info!("Course {} updated by {}", course.id, user.id);

    Ok(HttpResponse::Ok().json(course))
}

#[cfg(test)]
mod tests {
    use actix_web::{body::MessageBody, test::TestRequest};

    use super::super::test_support::*;
    use super::*;
    use crate::models::courses::{entities::Course, requests::CreateCourseRequest};

    #[tokio::test]
    async fn test_update_course() {
        let (storage, owner, center_id) = storage_with_center().await;
        let course = storage
            .create_course(CreateCourseRequest {
                name: "IELTS".to_string(),
                description: String::new(),
                teacher: "Malika".to_string(),
                edu_center_id: center_id,
            })
            .await
            .unwrap();
        let service = CourseService::new(storage);
        let request = TestRequest::default().to_http_request();

        let patch = UpdateCourseRequest {
            id: course.id,
            name: None,
            description: Some("Band 7+".to_string()),
            teacher: None,
        };
        let err = service
            .update_course(stranger(), patch.clone(), &request)
            .await
            .unwrap_err();
        assert_eq!(err, EduMatchError::Unauthorized);

        let resp = service.update_course(owner, patch, &request).await.unwrap();
        let body = resp.into_body().try_into_bytes().unwrap();
        let updated: Course = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.description, "Band 7+");
        assert_eq!(updated.teacher, "Malika");
    }
}
