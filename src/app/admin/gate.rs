//! 后台登录门禁
//!
//! 演示用的占位实现：固定账号明文比较，标记只在当前会话内有效。
//! 换成真正的身份服务时只需替换 `CredentialVerifier` 的实现。

use std::fmt;
use std::sync::Arc;

use crate::config::AdminConfig;

/// 凭据校验
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// 固定账号校验，明文完全相等才通过
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl From<&AdminConfig> for StaticCredentials {
    fn from(config: &AdminConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::from(&AdminConfig::default())
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// 单个会话的登录标记
#[derive(Clone)]
pub struct SessionGate {
    verifier: Arc<dyn CredentialVerifier>,
    authenticated: bool,
}

impl SessionGate {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            verifier,
            authenticated: false,
        }
    }

    /// 凭据匹配时设置标记并返回 true，否则返回 false，标记保持不变
    pub fn authenticate(&mut self, username: &str, password: &str) -> bool {
        if self.verifier.verify(username, password) {
            self.authenticated = true;
            true
        } else {
            false
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }
}

impl fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGate")
            .field("authenticated", &self.authenticated)
            .finish_non_exhaustive()
    }
}
