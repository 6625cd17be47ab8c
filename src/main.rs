use std::sync::Arc;

use smart_news::config::Config;
use smart_news::relay::NewsClient;
use smart_news::routes::{self, AppState};
use smart_news::weather::WeatherClient;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smart_news=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::var("NEWS_CONFIG").unwrap_or_else(|_| "news.toml".to_string());
    let mut config = Config::load_or_default(&config_path)?;
    config.apply_env();
    info!("Loaded configuration from {}", config_path);

    let news = NewsClient::new(&config.news_api)?;
    if !news.has_api_key() {
        warn!("NEWS_API_KEY is not set; upstream requests will be rejected");
    }
    let weather = WeatherClient::new(&config.weather)?;

    // Create app state
    let state = Arc::new(AppState {
        news,
        weather,
        ranking: config.ranking.clone(),
    });

    // Build router
    let app = routes::router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("Server running at http://{}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
