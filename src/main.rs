use genfin::config::Config;
use genfin::{api, AppState};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genfin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting GenFin server on {}:{}", config.host, config.port);
    info!(
        "History: {} bars over {} from {}",
        config.history.interval.as_str(),
        config.history.range.as_str(),
        config.history.base_url
    );
    if config.cors.allows_any() {
        warn!("CORS allows any origin");
    }

    let addr = config.bind_addr();
    let state = AppState::new(config)?;
    let app = api::app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("GenFin server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
