use shopfront::config;
use shopfront::infrastructure::logger::Logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config()?;

    Logger::init(&config.logging);
    tracing::info!("启动 {} ...", shopfront::app::SITE_NAME);

    shopfront::serve(config).await
}
