use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio::config::Config;
use portfolio::db::create_pool;
use portfolio::llm_client::{self, GeminiClient};
use portfolio::routes::build_router;
use portfolio::state::AppState;
use portfolio::store::{DocumentStore, MemoryStore, PgDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Document store: Postgres when configured, otherwise process memory
    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => Arc::new(PgDocumentStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; content is kept in memory and lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize LLM client
    let generator = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.llm_timeout,
    )?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    match config.context_cache_ttl {
        Some(ttl) => info!("Chat context cache TTL: {}s", ttl.as_secs()),
        None => info!("Chat context cache never expires"),
    }

    let state = AppState::new(config.clone(), store, generator);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the deployed site

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
