//! 核心中间件模块

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use std::time::Instant;
use tracing::{debug, info};

use super::error::CoreError;
use crate::app::AppState;

/// 管理后台登录页路径，未登录时重定向到这里
pub const LOGIN_PATH: &str = "/admin/login";

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        "{} {} - {} - {}ms - User-Agent: {:?}",
        method,
        uri,
        status,
        duration.as_millis(),
        user_agent
    );

    response
}

/// 管理后台守卫
///
/// 进入管理路由前检查会话标记。浏览器请求重定向到登录页，其他客户端返回 401。
/// 通过检查后把会话 id 放进请求扩展，供处理器使用。
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let session_id = state.sessions.session_id_from_jar(&jar);

    let authenticated = session_id
        .map(|id| state.sessions.is_authenticated(id))
        .unwrap_or(false);

    match session_id {
        Some(id) if authenticated => {
            req.extensions_mut().insert(id);
            next.run(req).await
        }
        _ => {
            debug!("未登录访问管理后台: {}", req.uri());
            if wants_html(&req) {
                Redirect::to(LOGIN_PATH).into_response()
            } else {
                CoreError::Unauthorized.into_response()
            }
        }
    }
}

fn wants_html(req: &Request) -> bool {
    req.headers()
        .get(header::ACCEPT)
        .and_then(|h| h.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false)
}
