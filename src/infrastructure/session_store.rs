//! 会话存储
//!
//! 每个浏览器会话由 cookie 中的 UUID 标识，服务端为它保存登录标记和一份独立的后台目录。
//! 数据只在进程内存里，会话空闲超时后被清理。

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::app::admin::gate::{CredentialVerifier, SessionGate};
use crate::app::catalog::CatalogRepository;
use crate::config::SessionConfig;

pub type SessionId = Uuid;

/// 为新会话创建后台目录
pub type CatalogFactory = Arc<dyn Fn() -> Box<dyn CatalogRepository> + Send + Sync>;

/// 单个浏览器会话的状态
pub struct BrowserSession {
    pub gate: SessionGate,
    pub catalog: Box<dyn CatalogRepository>,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, BrowserSession>>>,
    verifier: Arc<dyn CredentialVerifier>,
    catalog_factory: CatalogFactory,
    cookie_name: Arc<str>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(
        config: &SessionConfig,
        verifier: Arc<dyn CredentialVerifier>,
        catalog_factory: CatalogFactory,
    ) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            verifier,
            catalog_factory,
            cookie_name: Arc::from(config.cookie_name.as_str()),
            idle_timeout: Duration::from_secs(config.idle_timeout_seconds),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, BrowserSession>> {
        // 持锁期间只做同步的内存操作，中毒后数据仍可用
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn new_session(&self) -> BrowserSession {
        BrowserSession {
            gate: SessionGate::new(Arc::clone(&self.verifier)),
            catalog: (self.catalog_factory)(),
            last_seen: Instant::now(),
        }
    }

    /// 从 cookie 中取出会话 id，格式不对时视为没有
    pub fn session_id_from_jar(&self, jar: &CookieJar) -> Option<SessionId> {
        jar.get(&self.cookie_name)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    }

    /// 会话 cookie，不设置过期时间，浏览器关闭即失效
    pub fn session_cookie(&self, id: SessionId) -> Cookie<'static> {
        Cookie::build((self.cookie_name.to_string(), id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// 用凭据登录
    ///
    /// 已有会话时在原会话上登录；没有会话时只在登录成功后才创建，失败的尝试不占用内存。
    /// 成功时返回会话 id 和是否新建（需要下发 cookie），失败返回 None。
    pub fn login(
        &self,
        existing: Option<SessionId>,
        username: &str,
        password: &str,
    ) -> Option<(SessionId, bool)> {
        let mut sessions = self.lock();

        if let Some(id) = existing {
            if let Some(session) = sessions.get_mut(&id) {
                session.last_seen = Instant::now();
                return session.gate.authenticate(username, password).then_some((id, false));
            }
        }

        let mut session = self.new_session();
        if !session.gate.authenticate(username, password) {
            return None;
        }

        let id = Uuid::new_v4();
        sessions.insert(id, session);
        debug!("新建会话 {}", id);
        Some((id, true))
    }

    /// 在会话上执行操作，会话不存在时返回 None
    pub fn with_session<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut BrowserSession) -> R,
    ) -> Option<R> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(&id)?;
        session.last_seen = Instant::now();
        Some(f(session))
    }

    /// 只在会话已登录时执行操作；检查和操作在同一次加锁内完成
    pub fn with_authenticated<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut BrowserSession) -> R,
    ) -> Option<R> {
        self.with_session(id, |session| {
            session.gate.is_authenticated().then(|| f(session))
        })
        .flatten()
    }

    pub fn is_authenticated(&self, id: SessionId) -> bool {
        self.with_session(id, |session| session.gate.is_authenticated())
            .unwrap_or(false)
    }

    /// 清除登录标记，并丢弃这个会话在后台做的修改
    pub fn logout(&self, id: SessionId) {
        let fresh_catalog = (self.catalog_factory)();
        self.with_session(id, move |session| {
            session.gate.logout();
            session.catalog = fresh_catalog;
        });
    }

    /// 清理空闲超时的会话，返回清理数量
    pub fn sweep_idle(&self, now: Instant) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| {
            now.saturating_duration_since(session.last_seen) < self.idle_timeout
        });
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 启动后台任务，定期清理空闲会话
pub fn spawn_sweeper(store: SessionStore, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let evicted = store.sweep_idle(Instant::now());
            if evicted > 0 {
                info!("清理了 {} 个空闲会话，剩余 {}", evicted, store.len());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::admin::gate::StaticCredentials;
    use crate::app::catalog::{seed, ProductDraft};

    fn store(idle_timeout_seconds: u64) -> SessionStore {
        let config = SessionConfig {
            idle_timeout_seconds,
            ..SessionConfig::default()
        };
        SessionStore::new(
            &config,
            Arc::new(StaticCredentials::default()),
            Arc::new(|| -> Box<dyn CatalogRepository> { Box::new(seed::admin_catalog()) }),
        )
    }

    fn login(store: &SessionStore) -> SessionId {
        let (id, created) = store.login(None, "admin", "admin123").unwrap();
        assert!(created);
        id
    }

    #[test]
    fn login_creates_then_reuses() {
        let store = store(60);
        let id = login(&store);

        assert_eq!(store.login(Some(id), "admin", "admin123"), Some((id, false)));
        assert_eq!(store.len(), 1);
        assert!(store.is_authenticated(id));
    }

    #[test]
    fn failed_login_creates_no_session() {
        let store = store(60);
        assert_eq!(store.login(None, "admin", "wrong"), None);
        assert_eq!(store.login(Some(Uuid::new_v4()), "admin", "wrong"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_session_id_gets_a_new_session() {
        let store = store(60);
        let stale = Uuid::new_v4();
        let (id, created) = store.login(Some(stale), "admin", "admin123").unwrap();
        assert!(created);
        assert_ne!(id, stale);
    }

    #[test]
    fn session_cookie_round_trips_through_jar() {
        let store = store(60);
        let id = login(&store);
        let cookie = store.session_cookie(id);
        assert_eq!(cookie.name(), "shopfront_session");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert!(cookie.max_age().is_none());

        let jar = CookieJar::new().add(Cookie::new("theme", "dark")).add(cookie);
        assert_eq!(store.session_id_from_jar(&jar), Some(id));
    }

    #[test]
    fn malformed_cookie_is_ignored() {
        let store = store(60);
        let jar = CookieJar::new().add(Cookie::new("shopfront_session", "not-a-uuid"));
        assert_eq!(store.session_id_from_jar(&jar), None);
        assert_eq!(store.session_id_from_jar(&CookieJar::new()), None);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = store(60);
        let a = login(&store);
        let b = login(&store);

        store.with_authenticated(a, |s| s.catalog.remove(1));

        assert_eq!(store.with_session(b, |s| s.catalog.len()), Some(3));
        assert_eq!(store.with_session(a, |s| s.catalog.len()), Some(2));
    }

    #[test]
    fn with_authenticated_refuses_logged_out_session() {
        let store = store(60);
        let id = login(&store);
        store.logout(id);

        let added = store.with_authenticated(id, |s| {
            s.catalog.add(ProductDraft::new("X", "d", "Glassware"))
        });
        assert!(added.is_none());
        assert_eq!(store.with_session(id, |s| s.catalog.len()), Some(3));
    }

    #[test]
    fn logout_clears_flag_and_resets_catalog() {
        let store = store(60);
        let id = login(&store);
        store.with_authenticated(id, |s| {
            s.catalog.add(ProductDraft::new("New", "d", "Glassware")).unwrap();
        });

        store.logout(id);

        assert!(!store.is_authenticated(id));
        assert_eq!(store.with_session(id, |s| s.catalog.len()), Some(3));
    }

    #[test]
    fn sweep_evicts_only_idle_sessions() {
        let store = store(60);
        let id = login(&store);

        assert_eq!(store.sweep_idle(Instant::now()), 0);
        assert_eq!(store.sweep_idle(Instant::now() + Duration::from_secs(61)), 1);
        assert!(!store.is_authenticated(id));
        assert!(store.is_empty());
    }
}
