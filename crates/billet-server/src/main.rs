//! # billet-server
//!
//! HTTP server for a two-person letters archive.
//!
//! This binary provides:
//! - **Session gate**: each of the two configured identities logs in
//!   with their secret phrase and gets a bearer token
//! - **Letter service**: latest-letter-from-partner, full archive, and
//!   compose, all backed by an append-only SQLite log
//! - **REST API** (axum) consumed by whatever front-end renders the
//!   letters

mod api;
mod config;
mod error;
mod service;
mod sessions;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use billet_store::Database;

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::service::LetterService;
use crate::sessions::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,billet_server=debug")),
        )
        .init();

    info!("Starting letters server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration (fails fast on missing or ambiguous identities)
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env()?;
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Open the letter log (an absent file becomes a valid empty log)
    // -----------------------------------------------------------------------
    let db = match &config.db_path {
        Some(path) => Database::open_at(path)?,
        None => Database::new()?,
    };

    let app_state = AppState {
        service: LetterService::new(db),
        sessions: SessionStore::new(),
        pair: Arc::new(config.pair.clone()),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, config.http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
