// Main entry point for the job board API server

use std::sync::Arc;

use anyhow::{Context, Result};
use board_core::server::build_app;
use board_core::store::{JobCollection, MemoryCollection, PgCollection};
use board_core::{Config, StoreBackend};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,board_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Job Board API");

    let config = Config::from_env().context("Failed to load configuration")?;

    let collection: Arc<dyn JobCollection> = match config.store {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres store")?;

            tracing::info!("Connecting to Postgres");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .context("Could not connect to Postgres")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Migration run failed")?;
            tracing::info!("Connected, migrations applied");

            Arc::new(PgCollection::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; postings are not durable");
            Arc::new(MemoryCollection::new())
        }
    };

    let app = build_app(collection);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Could not bind {addr}"))?;

    tracing::info!("Board API listening on {}", addr);
    tracing::info!("  postings:     http://localhost:{}/api/jobs", config.port);
    tracing::info!("  health check: http://localhost:{}/health", config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
