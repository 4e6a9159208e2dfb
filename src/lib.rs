//! # Shopfront
//!
//! 零售店网站的后端：
//! - 前台商品列表，按分类过滤
//! - 演示用的管理后台：固定账号登录，按会话保存的内存商品目录（增删改查）
//!
//! 所有状态都只在进程内存中，会话结束即丢失。

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod server;

pub use app::{build_router, AppState};
pub use config::Config;
pub use server::serve;
