use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sheet_insight::db::{MemoryRecordStore, PgRecordStore, RecordStore};
use sheet_insight::llm::{LLMProviderConfig, LLM};
use sheet_insight::storage::LocalBlobStore;
use sheet_insight::{config::Config, create_router, utils::init_logger, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    let records: Arc<dyn RecordStore> = match &config.database.url {
        Some(url) => {
            let pool = sheet_insight::db::create_pool(url, &config.database).await?;

            info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
            info!("Database migrations completed");

            Arc::new(PgRecordStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, records are kept in memory only");
            Arc::new(MemoryRecordStore::new())
        }
    };

    let blobs = Arc::new(LocalBlobStore::new(&config.storage.root));
    info!(dir = %blobs.dir().display(), "Blob storage ready");

    if config.llm.openai_api_key.is_empty() {
        warn!("OPENAI_API_KEY not set, insight requests will fail");
    }
    let llm = Arc::new(LLM::new(LLMProviderConfig {
        name: config.llm.provider.clone(),
        api_key: config.llm.openai_api_key.clone(),
        base_url: config.llm.base_url.clone(),
        timeout: Duration::from_secs(config.llm.timeout_secs),
    })?);
    info!(provider = llm.provider_name(), model = %config.llm.model, "LLM client ready");

    // Create shared state
    let state = AppState::new(config.clone(), records, blobs, llm);

    // Create router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
