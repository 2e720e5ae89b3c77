use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use crate::config::UploadConfig;
use crate::errors::{EduMatchError, Result};
use crate::utils::file_magic::{image_extension, validate_magic_bytes};

/// 封面图片表单字段名
pub const COVER_IMAGE_FIELD: &str = "cover_image";
/// 头像表单字段名
pub const AVATAR_FIELD: &str = "avatar";

/// 已校验的上传图片，写盘前保存在内存中
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub extension: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}

/// 读完一个字段，超过 `limit` 字节时返回 `Validation`
async fn read_limited(field: &mut Field, name: &str, limit: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|_| EduMatchError::InvalidRequestPayload)?;
        if bytes.len() + data.len() > limit {
            return Err(EduMatchError::validation(format!(
                "{name} must not exceed {limit} bytes"
            )));
        }
        bytes.extend_from_slice(&data);
    }
    Ok(bytes)
}

/// 读取 multipart 表单：文本字段放入 map，`image_field` 作为图片读取
///
/// 图片的扩展名、魔术字节与大小在这里校验，文本字段受 `max_field_size` 限制，
/// 不合法时返回 `Validation`。
pub async fn read_form(
    mut payload: Multipart,
    image_field: &str,
    limits: &UploadConfig,
) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|_| EduMatchError::InvalidRequestPayload)?
    {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let filename = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        if name == image_field {
            if form.image.is_some() {
                return Err(EduMatchError::validation(format!(
                    "only one {image_field} is allowed"
                )));
            }
            // 空文件名表示未选择文件
            let Some(filename) = filename.filter(|f| !f.is_empty()) else {
                while field.next().await.is_some() {}
                continue;
            };
            let extension = image_extension(&filename).ok_or_else(|| {
                EduMatchError::validation(format!(
                    "{image_field} must be a png, jpg, jpeg, gif, webp or bmp file"
                ))
            })?;

            let bytes = read_limited(&mut field, image_field, limits.max_size).await?;
            if !validate_magic_bytes(&bytes, &extension) {
                return Err(EduMatchError::validation(format!(
                    "{image_field} content does not match its extension"
                )));
            }
            form.image = Some(UploadedImage { extension, bytes });
        } else {
            let value = read_limited(&mut field, &name, limits.max_field_size).await?;
            let value = String::from_utf8(value).map_err(|_| EduMatchError::InvalidRequestPayload)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
