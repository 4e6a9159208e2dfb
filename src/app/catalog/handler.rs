//! 前台商品列表处理器

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::{model::Product, seed};
use crate::app::AppState;
use crate::core::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// 商品列表页数据：分类标签、当前分类和该分类下的商品
#[derive(Debug, Serialize)]
pub struct ProductListing {
    pub categories: Vec<String>,
    pub active_category: String,
    pub products: Vec<Product>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Json<ApiResponse<ProductListing>> {
    let active_category = query
        .category
        .unwrap_or_else(|| seed::DEFAULT_CATEGORY.to_string());

    let products = state.storefront.filter_by_category(&active_category);
    let message = format!("{} products in {}", products.len(), active_category);

    let listing = ProductListing {
        categories: seed::CATEGORIES.iter().map(|c| c.to_string()).collect(),
        active_category,
        products,
    };

    Json(ApiResponse::success(listing, message))
}
