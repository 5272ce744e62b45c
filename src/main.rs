use quantscope::{api, config::Config, services::Analyzer, sources::YahooFinanceClient, AppState};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
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
                .unwrap_or_else(|_| "quantscope=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting QuantScope server on {}", config.bind_addr());

    let source = YahooFinanceClient::new(&config)?;
    info!(
        "Using Yahoo Finance at {} ({} / {})",
        config.yahoo_base_url, config.history_range, config.history_interval
    );

    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(Analyzer::new(Arc::new(source))),
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("QuantScope server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
