//! Restaurant Cache - restaurant and review REST service
//!
//! Serves paginated restaurant listings through a cache-aside layer.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use restaurant_cache::api::create_router;
use restaurant_cache::cache::Cache;
use restaurant_cache::store::RestaurantRepository;
use restaurant_cache::{AppState, Config};

/// Main entry point for the restaurant service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the restaurant store (SQLite with feature `sqlite`) and the listing cache
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restaurant_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting restaurant service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, store={}, cache={}, default_expiration={}s",
        config.server_port,
        config.database_url,
        config.redis_url(),
        config.default_expiration
    );

    let repository = open_store(&config).await?;
    let (cache, cleanup_handle) = open_cache(&config).await?;

    let state = AppState::with_backends(repository, cache, config.cache_ttl());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

#[cfg(feature = "sqlite")]
async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn RestaurantRepository>> {
    let repository = restaurant_cache::store::SqliteRepository::open(config.database_path())
        .await
        .context("failed to open the restaurant store")?;
    info!("Opened SQLite store at {}", config.database_path());
    Ok(Arc::new(repository))
}

#[cfg(not(feature = "sqlite"))]
async fn open_store(_config: &Config) -> anyhow::Result<Arc<dyn RestaurantRepository>> {
    warn!("Using in-memory store; data is lost on restart");
    Ok(Arc::new(restaurant_cache::store::InMemoryRepository::new()))
}

#[cfg(feature = "redis")]
async fn open_cache(config: &Config) -> anyhow::Result<(Arc<dyn Cache>, Option<JoinHandle<()>>)> {
    let cache = restaurant_cache::cache::RedisCache::connect(&config.redis_url())
        .await
        .context("failed to connect to the cache store")?;
    info!("Connected to Redis at {}", config.redis_url());
    Ok((Arc::new(cache), None))
}

#[cfg(not(feature = "redis"))]
async fn open_cache(config: &Config) -> anyhow::Result<(Arc<dyn Cache>, Option<JoinHandle<()>>)> {
    let cache = restaurant_cache::cache::MemoryCache::new();
    let handle = restaurant_cache::spawn_cleanup_task(cache.clone(), config.cleanup_interval);
    info!("Memory cache initialized");
    Ok((Arc::new(cache), Some(handle)))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
