//! 基础设施层：日志、会话存储

pub mod logger;
pub mod session_store;
