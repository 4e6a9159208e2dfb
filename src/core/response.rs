//! 核心响应处理模块

use serde::Serialize;
use uuid::Uuid;

/// API 响应结构
///
/// `message` 是给用户看的通知文本，对应页面上的提示。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
    pub request_id: String,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::new(true, data, message)
    }

    /// 业务上的失败通知（不是错误），例如登录失败
    pub fn failure(data: T, message: impl Into<String>) -> Self {
        Self::new(false, data, message)
    }

    fn new(success: bool, data: T, message: impl Into<String>) -> Self {
        Self {
            success,
            data,
            message: message.into(),
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
