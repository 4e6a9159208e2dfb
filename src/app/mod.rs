//! 应用层：前台商品列表和管理后台

pub mod admin;
pub mod catalog;

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use self::admin::{AdminService, StaticCredentials};
use self::catalog::{seed, CatalogRepository};
use crate::config::Config;
use crate::core::middleware::{request_logging_middleware, require_admin};
use crate::infrastructure::session_store::SessionStore;

/// 站点名称
pub const SITE_NAME: &str = "Kush Smoke Shop";

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub admin: AdminService,
    /// 前台只读目录
    pub storefront: Arc<dyn CatalogRepository>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let sessions = SessionStore::new(
            &config.session,
            Arc::new(StaticCredentials::from(&config.admin)),
            Arc::new(|| -> Box<dyn CatalogRepository> { Box::new(seed::admin_catalog()) }),
        );

        Self {
            admin: AdminService::new(sessions.clone()),
            sessions,
            storefront: Arc::new(seed::storefront_catalog()),
        }
    }
}

/// 组装路由
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let admin_routes = Router::new()
        .route(
            "/admin/products",
            get(admin::handler::list_products).post(admin::handler::create_product),
        )
        .route(
            "/admin/products/:id",
            get(admin::handler::get_product)
                .put(admin::handler::update_product)
                .delete(admin::handler::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(site_info))
        .route("/health", get(health_check))
        .route("/products", get(catalog::handler::list_products))
        .route(
            "/admin/login",
            get(admin::handler::login_view).post(admin::handler::login),
        )
        .route("/admin/logout", post(admin::handler::logout))
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// 站点信息
async fn site_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": SITE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "navigation": [
            { "name": "Home", "path": "/" },
            { "name": "Products", "path": "/products" },
            { "name": "About", "path": "/about" },
            { "name": "Contact", "path": "/contact" }
        ],
        "endpoints": {
            "GET /products": "商品列表，查询参数 category，默认 Glassware",
            "GET /admin/login": "登录页",
            "POST /admin/login": "管理员登录",
            "POST /admin/logout": "登出",
            "GET /admin/products": "后台商品列表（需登录）",
            "POST /admin/products": "新增商品（需登录）",
            "GET /admin/products/:id": "单个商品，编辑表单用（需登录）",
            "PUT /admin/products/:id": "编辑商品（需登录）",
            "DELETE /admin/products/:id": "删除商品（需登录）",
            "GET /health": "健康检查"
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "storage": {
            "type": "in-memory",
            "active_sessions": state.sessions.len(),
            "storefront_products": state.storefront.len()
        }
    }))
}
