//! Noodle Timer - cup noodle timer voice skill
//!
//! A Rust backend implementing a per-turn state machine that starts a
//! platform timer sized to the noodle and the softness the user asked for.

mod alexa;
mod api;
mod config;
mod db;
mod permission;
mod runtime;
mod speech;
mod state_machine;
mod timer;

use api::{create_router, AppState};
use config::SkillConfig;
use db::Database;
use runtime::{DatabaseStore, ProductionRuntime};
use std::net::SocketAddr;
use std::path::PathBuf;
use timer::AlexaTimerClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noodle_timer=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    let config = SkillConfig::from_env();

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&config.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %config.db_path, "Opening database");
    let db = Database::open(&config.db_path)?;

    let timer_client = AlexaTimerClient::new(config.api_timeout)?;
    let runtime = ProductionRuntime::new(timer_client, DatabaseStore::new(db));

    if config.skill_id.is_none() {
        tracing::warn!("NOODLE_TIMER_SKILL_ID not set; accepting requests for any skill");
    }

    let app = create_router(AppState::new(runtime, config.skill_id));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Noodle timer listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
