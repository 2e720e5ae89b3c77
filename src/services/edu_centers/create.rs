use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::EduCenterService;
use crate::errors::Result;
use crate::middlewares::AuthUser;
use crate::models::edu_centers::requests::CreateEduCenterRequest;
use crate::services::discard_image;
use crate::utils::multipart::MultipartForm;

/// 创建教育中心
///
/// 表单在写入封面之前完成校验；封面写入后，数据库事务失败时删除该封面。
/// 封面删除失败只记录日志，返回的仍是事务的错误。
pub async fn create_edu_center(
    service: &EduCenterService,
    user: AuthUser,
    form: MultipartForm,
    request: &HttpRequest,
) -> Result<HttpResponse> {
    let storage = service.get_storage(request)?;
    let images = service.get_image_store(request)?;

    // 1. 校验表单
    let req = CreateEduCenterRequest::from_form(&form.fields)?;

    // 2. 写入封面
    let cover = form.image.as_ref().map(|image| images.save(image)).transpose()?;

    // 3. 教育中心与联系方式在同一事务中写入
    match storage.create_edu_center(user.id, req, cover.clone()).await {
        Ok(center) => {
            info!("EduCenter {} created by {}", center.id, user.id);
            Ok(HttpResponse::Created().json(center))
        }
        Err(err) => {
            if let Some(name) = &cover {
                discard_image(&images, name);
            }
            Err(err)
        }
    }
}
