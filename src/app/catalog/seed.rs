//! 初始商品数据
//!
//! 前台展示目录和后台管理目录是两份独立的数据，后台的修改不会影响前台。

use super::model::{Product, ProductId};
use super::repository::InMemoryCatalog;

/// 前台分类标签
pub const CATEGORIES: [&str; 4] = ["Glassware", "Vaporizers", "Accessories", "CBD Products"];

/// 前台默认选中的分类
pub const DEFAULT_CATEGORY: &str = "Glassware";

fn product(id: ProductId, name: &str, description: &str, category: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
    }
}

/// 前台只读目录
pub fn storefront_catalog() -> InMemoryCatalog {
    InMemoryCatalog::with_products(vec![
        product(
            1,
            "Premium Water Pipe",
            "High-quality borosilicate glass with percolator",
            "Glassware",
        ),
        product(
            2,
            "Hand Pipe Collection",
            "Artistic hand-blown glass pipes in various designs",
            "Glassware",
        ),
        product(3, "Bubblers", "Compact design with smooth filtration", "Glassware"),
        product(4, "Dab Rigs", "Professional-grade concentrate rigs", "Glassware"),
    ])
}

/// 每个会话进入后台时拿到的初始目录
pub fn admin_catalog() -> InMemoryCatalog {
    InMemoryCatalog::with_products(vec![
        product(
            1,
            "Premium Water Pipe",
            "High-quality borosilicate glass with percolator",
            "Glassware",
        ),
        product(
            2,
            "Hand Pipe Collection",
            "Artistic hand-blown glass pipes in various designs",
            "Glassware",
        ),
        product(3, "Vaporizers", "Latest vaping devices and accessories", "Electronics"),
    ])
}
