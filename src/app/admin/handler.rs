//! 后台处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use axum_extra::extract::{CookieJar, WithRejection};
use serde::{Deserialize, Serialize};

use crate::app::catalog::{Product, ProductDraft, ProductId};
use crate::app::AppState;
use crate::core::{error::CoreError, middleware::LOGIN_PATH, response::ApiResponse};
use crate::infrastructure::session_store::SessionId;

/// 登录成功后进入的页面
pub const PRODUCTS_PATH: &str = "/admin/products";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub authenticated: bool,
    pub redirect_to: Option<String>,
}

/// 登录页数据
#[derive(Debug, Serialize)]
pub struct LoginView {
    pub authenticated: bool,
    pub fields: Vec<&'static str>,
    pub submit_to: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LogoutOutcome {
    pub redirect_to: String,
}

pub async fn login_view(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Json<ApiResponse<LoginView>> {
    let authenticated = state
        .sessions
        .session_id_from_jar(&jar)
        .map(|id| state.admin.is_authenticated(id))
        .unwrap_or(false);

    Json(ApiResponse::success(
        LoginView {
            authenticated,
            fields: vec!["username", "password"],
            submit_to: LOGIN_PATH,
        },
        "Enter your credentials to access the admin panel",
    ))
}

/// 登录。只有新建会话时 jar 里才会多出 cookie，响应才带 Set-Cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, CoreError>,
) -> (StatusCode, CookieJar, Json<ApiResponse<LoginOutcome>>) {
    let existing = state.sessions.session_id_from_jar(&jar);

    match state.admin.login(existing, &payload.username, &payload.password) {
        Some((session, created)) => {
            let jar = if created {
                jar.add(state.sessions.session_cookie(session))
            } else {
                jar
            };

            (
                StatusCode::OK,
                jar,
                Json(ApiResponse::success(
                    LoginOutcome {
                        authenticated: true,
                        redirect_to: Some(PRODUCTS_PATH.to_string()),
                    },
                    "Login successful! Welcome to admin panel.",
                )),
            )
        }
        None => (
            StatusCode::UNAUTHORIZED,
            jar,
            Json(ApiResponse::failure(
                LoginOutcome {
                    authenticated: false,
                    redirect_to: None,
                },
                "Invalid credentials! Please try again.",
            )),
        ),
    }
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Json<ApiResponse<LogoutOutcome>> {
    if let Some(session) = state.sessions.session_id_from_jar(&jar) {
        state.admin.logout(session);
    }

    Json(ApiResponse::success(
        LogoutOutcome {
            redirect_to: LOGIN_PATH.to_string(),
        },
        "Logged out successfully",
    ))
}

pub async fn list_products(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let products = state.admin.list_products(session)?;
    let message = format!("Products List ({})", products.len());
    Ok(Json(ApiResponse::success(products, message)))
}

/// 编辑表单需要的单个商品
pub async fn get_product(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    WithRejection(Path(id), _): WithRejection<Path<ProductId>, CoreError>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    let product = state.admin.get_product(session, id)?;
    Ok(Json(ApiResponse::success(product, "Edit Product")))
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    WithRejection(Json(draft), _): WithRejection<Json<ProductDraft>, CoreError>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), CoreError> {
    let product = state.admin.add_product(session, draft)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(product, "Product added successfully")),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    WithRejection(Path(id), _): WithRejection<Path<ProductId>, CoreError>,
    WithRejection(Json(draft), _): WithRejection<Json<ProductDraft>, CoreError>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    let product = state.admin.update_product(session, id, draft)?;
    Ok(Json(ApiResponse::success(product, "Product updated successfully")))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    WithRejection(Path(id), _): WithRejection<Path<ProductId>, CoreError>,
) -> Result<Json<ApiResponse<()>>, CoreError> {
    state.admin.remove_product(session, id)?;
    Ok(Json(ApiResponse::success((), "Product deleted successfully")))
}
