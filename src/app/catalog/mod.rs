//! 商品目录

pub mod handler;
pub mod model;
pub mod repository;
pub mod seed;

pub use model::{CatalogError, Product, ProductDraft, ProductId};
pub use repository::{CatalogRepository, InMemoryCatalog};
