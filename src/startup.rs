use crate::{
    config::Config,
    db::{create_pool, init_schema},
    errors::AppError,
    repositories::SqliteIdeaRepository,
    routes::create_router,
    seed::seed_if_empty,
    AppState,
};
use std::sync::Arc;
use tokio::signal;

/// Initializes the database, builds the router and serves until a shutdown signal.
/// The pool is opened here and closed before returning.
pub async fn run(config: Config) -> Result<(), AppError> {
    tracing::info!("Startup: Initializing resources...");

    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| AppError::InitError(format!("Startup: {:#}", e)))?;
    init_schema(&pool)
        .await
        .map_err(|e| AppError::InitError(format!("Startup: {:#}", e)))?;

    let idea_repo = Arc::new(SqliteIdeaRepository::new(pool.clone()));

    if config.seed_on_startup {
        let inserted = seed_if_empty(idea_repo.as_ref()).await?;
        tracing::info!(inserted, "Startup: Seed step finished");
    }

    if !config.static_dir.exists() {
        tracing::info!(static_dir = %config.static_dir.display(), "Startup: Creating static directory");
        tokio::fs::create_dir_all(&config.static_dir).await?;
    }

    let state = Arc::new(AppState { idea_repo });
    let app = create_router(state, &config.static_dir);

    tracing::info!("Server listening on http://{}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown: Closing database pool");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
    tracing::info!("Shutdown signal received");
}
