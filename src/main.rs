use augur::config::Config;
use augur::services::TradeStore;
use augur::AppState;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting Augur server on {}:{}", config.host, config.port);

    // Open the trade log
    let trade_store = TradeStore::new(&config.database_path)?;
    info!("Trade log at {}", config.database_path);

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, trade_store)?;
    let app = augur::app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Augur server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
