#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use axum::Router;
use orderhub_api::{construct_router, state::State};
use orderhub_migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting OrderHub API Service");

    let config = config::Config::from_env()?;

    let state = Arc::new(State::new().await);

    Migrator::up(&state.db, None).await?;
    tracing::info!("Database migrations applied");

    let app = Router::new().merge(construct_router(state.clone()));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
