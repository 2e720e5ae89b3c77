use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::UploadConfig;
use crate::errors::{EduMatchError, Result};
use crate::utils::multipart::UploadedImage;

/// 封面图片的文件存储
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self::with_dir(&config.dir)
    }

    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().join("images"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// 写入图片，返回以 UUID 命名的文件名
    pub fn save(&self, image: &UploadedImage) -> Result<String> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .map_err(|e| EduMatchError::file_operation(format!("创建上传目录失败: {e}")))?;
        }
        let name = format!("{}{}", Uuid::new_v4(), image.extension);
        fs::write(self.path(&name), &image.bytes)
            .map_err(|e| EduMatchError::file_operation(format!("保存图片失败: {e}")))?;
        Ok(name)
    }

    /// 删除图片，文件名不能包含路径
    pub fn delete(&self, name: &str) -> Result<()> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(EduMatchError::file_operation(format!("非法的文件名: {name}")));
        }
        fs::remove_file(self.path(name))
            .map_err(|e| EduMatchError::file_operation(format!("删除图片失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> ImageStore {
        ImageStore::with_dir(std::env::temp_dir().join(format!("edumatch-{}", Uuid::new_v4())))
    }

    fn png() -> UploadedImage {
        UploadedImage {
            extension: ".png".to_string(),
            bytes: vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3],
        }
    }

    #[test]
    fn test_save_then_delete() {
        let store = temp_store();
        let name = store.save(&png()).unwrap();
        assert!(name.ends_with(".png"));
        assert_eq!(fs::read(store.path(&name)).unwrap(), png().bytes);

        store.delete(&name).unwrap();
        assert!(!store.path(&name).exists());
        assert!(store.delete(&name).is_err());
    }

    #[test]
    fn test_delete_rejects_paths() {
        let store = temp_store();
        assert!(store.delete("../secret.png").is_err());
        assert!(store.delete("a/b.png").is_err());
    }
}
