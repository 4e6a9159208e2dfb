//! 服务启动与优雅退出

use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::app::{build_router, AppState};
use crate::config::Config;
use crate::infrastructure::session_store::spawn_sweeper;

/// 按配置启动服务，直到收到退出信号
pub async fn serve(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let state = AppState::new(&config);

    let sweeper = spawn_sweeper(
        state.sessions.clone(),
        Duration::from_secs(config.session.sweep_interval_seconds),
    );

    let app = build_router(state, Duration::from_secs(config.http.timeout_seconds));

    let address = config.http.socket_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("无法绑定到 {}", address))?;

    info!("🚀 服务器运行在 http://{}", address);
    info!("📖 前台: GET /products?category=Glassware");
    info!("🔐 后台: POST /admin/login, /admin/products");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    sweeper.abort();
    info!("服务器已关闭");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("收到 Ctrl+C，准备关闭");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("收到 terminate 信号，准备关闭");
            }
            Err(e) => {
                tracing::error!("无法监听 terminate 信号: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serve_rejects_zero_sweep_interval() {
        let mut config = Config::default();
        config.session.sweep_interval_seconds = 0;
        // 校验在绑定端口之前完成，端口不会被占用
        config.http.port = 1;

        let err = serve(config).await.unwrap_err();
        assert!(err.to_string().contains("清理间隔"));
    }
}
