//! 站点配置
//!
//! 配置从 TOML 文件加载，找不到配置文件时使用默认值。

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "SHOPFRONT_CONFIG";

/// 站点配置结构
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 管理员登录配置
    pub admin: AdminConfig,
    /// 会话配置
    pub session: SessionConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 管理员登录配置
///
/// 演示用的固定账号，明文比较，不做哈希。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

/// 会话配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 会话 cookie 名称
    pub cookie_name: String,
    /// 会话空闲多久视为丢失（秒）
    pub idle_timeout_seconds: u64,
    /// 清理空闲会话的间隔（秒）
    pub sweep_interval_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            timeout_seconds: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "shopfront_session".to_string(),
            idle_timeout_seconds: 30 * 60,
            sweep_interval_seconds: 60,
        }
    }
}

impl HttpConfig {
    /// 监听地址，如 `127.0.0.1:3000`
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }

        if self.admin.username.is_empty() || self.admin.password.is_empty() {
            return Err(ConfigError::Validation("管理员账号和密码不能为空".to_string()));
        }

        if self.session.cookie_name.is_empty() {
            return Err(ConfigError::Validation("会话 cookie 名称不能为空".to_string()));
        }
        if self.session.idle_timeout_seconds == 0 || self.session.sweep_interval_seconds == 0 {
            return Err(ConfigError::Validation("会话超时和清理间隔必须大于0".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 候选配置文件路径，环境变量优先
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from("config.toml"));
    paths.push(PathBuf::from("./config/config.toml"));
    paths
}

/// 从文件或默认值加载配置，并做校验
pub fn load_config() -> Result<Config, ConfigError> {
    let config = match candidate_paths().into_iter().find(|p| p.exists()) {
        Some(path) => {
            info!("从配置文件加载: {}", path.display());
            Config::load_from_file(&path)?
        }
        None => {
            info!("未找到配置文件，使用默认配置");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}
