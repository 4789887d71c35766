//! Inserts the sample ideas into an empty database. Safe to run repeatedly.

use idea_board::{
    config::Config,
    db::{create_pool, init_schema},
    errors::AppError,
    repositories::SqliteIdeaRepository,
    seed::seed_if_empty,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "idea_board=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let pool = create_pool(&config.database_url, 1)
        .await
        .map_err(|e| AppError::InitError(format!("{:#}", e)))?;
    init_schema(&pool)
        .await
        .map_err(|e| AppError::InitError(format!("{:#}", e)))?;

    let repo = SqliteIdeaRepository::new(pool.clone());
    let inserted = seed_if_empty(&repo).await?;
    if inserted == 0 {
        tracing::info!("Database already has ideas, nothing to seed");
    } else {
        tracing::info!(inserted, "Seed complete");
    }

    pool.close().await;
    Ok(())
}
