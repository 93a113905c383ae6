use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use packshot_api::config::ServerConfig;
use packshot_api::routes;
use packshot_api::state::AppState;
use packshot_genai::{GenAiClient, ImageGenerator};
use packshot_pipeline::Orchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "packshot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");
    if config.genai_api_key.is_empty() {
        tracing::warn!("GENAI_API_KEY is not set; generation calls will fail");
    }

    // --- Generation pipeline ---
    let generator: Arc<dyn ImageGenerator> = Arc::new(GenAiClient::new(
        config.genai_api_url.clone(),
        config.genai_api_key.clone(),
    ));
    let orchestrator = Arc::new(Orchestrator::new(generator));
    let state = AppState::new(orchestrator);

    // --- Router ---
    let app = routes::router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )));

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(%addr, "Starting packshot API");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
