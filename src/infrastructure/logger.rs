//! 日志基础设施

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化全局日志，`RUST_LOG` 优先于配置文件中的级别
    ///
    /// 重复初始化（例如测试里）时静默忽略。
    pub fn init(config: &LoggingConfig) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.level));

        let _ = fmt().with_env_filter(filter).with_target(false).try_init();
    }
}
