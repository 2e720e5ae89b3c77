use serde::{Deserialize, Serialize};

// 仅包含提示信息的响应（删除、评分等操作）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// 创建成功后返回新资源的 ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: uuid::Uuid,
}
