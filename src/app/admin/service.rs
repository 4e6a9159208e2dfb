//! 后台业务服务
//!
//! 每个目录操作都在同一次加锁内先检查登录标记，再读写目录。

use tracing::{info, warn};

use crate::app::catalog::{CatalogError, Product, ProductDraft, ProductId};
use crate::core::error::CoreError;
use crate::infrastructure::session_store::{SessionId, SessionStore};

#[derive(Clone)]
pub struct AdminService {
    sessions: SessionStore,
}

impl AdminService {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }

    /// 登录。失败不是错误，返回 None；成功返回会话 id 以及是否新建了会话
    pub fn login(
        &self,
        existing: Option<SessionId>,
        username: &str,
        password: &str,
    ) -> Option<(SessionId, bool)> {
        let outcome = self.sessions.login(existing, username, password);

        match outcome {
            Some(_) => info!("管理员 {} 登录成功", username),
            None => warn!("管理员登录失败: {}", username),
        }
        outcome
    }

    pub fn logout(&self, session: SessionId) {
        self.sessions.logout(session);
        info!("会话 {} 已登出", session);
    }

    pub fn is_authenticated(&self, session: SessionId) -> bool {
        self.sessions.is_authenticated(session)
    }

    pub fn list_products(&self, session: SessionId) -> Result<Vec<Product>, CoreError> {
        self.sessions
            .with_authenticated(session, |s| s.catalog.list())
            .ok_or(CoreError::Unauthorized)
    }

    /// 编辑表单加载单个商品
    pub fn get_product(&self, session: SessionId, id: ProductId) -> Result<Product, CoreError> {
        self.sessions
            .with_authenticated(session, |s| s.catalog.get(id))
            .ok_or(CoreError::Unauthorized)?
            .ok_or_else(|| CatalogError::NotFound(id).into())
    }

    pub fn add_product(&self, session: SessionId, draft: ProductDraft) -> Result<Product, CoreError> {
        self.sessions
            .with_authenticated(session, |s| s.catalog.add(draft))
            .ok_or(CoreError::Unauthorized)?
            .map_err(CoreError::from)
    }

    pub fn update_product(
        &self,
        session: SessionId,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, CoreError> {
        self.sessions
            .with_authenticated(session, |s| s.catalog.update(id, draft))
            .ok_or(CoreError::Unauthorized)?
            .map_err(CoreError::from)
    }

    pub fn remove_product(&self, session: SessionId, id: ProductId) -> Result<(), CoreError> {
        self.sessions
            .with_authenticated(session, |s| s.catalog.remove(id))
            .ok_or(CoreError::Unauthorized)
    }
}
