//! 管理后台：登录门禁和商品管理

pub mod gate;
pub mod handler;
pub mod service;

pub use gate::{CredentialVerifier, SessionGate, StaticCredentials};
pub use service::AdminService;
