//! Server configuration loaded from environment variables.
//!
//! Identity names and secret phrases have no defaults: they must come
//! from the environment (or whatever secret store populates it), never
//! from source code. Everything else falls back to sensible values for
//! local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use billet_shared::{Identity, IdentityPair, PairError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    /// Bad two-identity configuration (duplicate or empty names/secrets).
    #[error("Identity configuration error: {0}")]
    Pair(#[from] PairError),
}

/// Server configuration.
///
/// `IdentityPair` redacts secrets from its Debug output, so the whole
/// config can be logged at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Filesystem path of the letters database.
    /// Env: `LETTERS_DB_PATH`
    /// Default: none (platform data directory is used).
    pub db_path: Option<PathBuf>,

    /// The two configured identities with their secret phrases.
    /// Env: `IDENTITY_A_NAME`, `IDENTITY_A_SECRET`,
    ///      `IDENTITY_B_NAME`, `IDENTITY_B_SECRET`
    pub pair: IdentityPair,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails fast on missing identity variables or an ambiguous pair
    /// (equal names or equal secrets) rather than starting a server
    /// nobody can log in to safely.
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr = match std::env::var("HTTP_ADDR") {
            Ok(addr) => parse_http_addr(&addr).unwrap_or_else(|| {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
                default_http_addr()
            }),
            Err(_) => default_http_addr(),
        };

        let db_path = std::env::var("LETTERS_DB_PATH").ok().map(PathBuf::from);

        let pair = IdentityPair::new(
            Identity::new(
                require_var("IDENTITY_A_NAME")?,
                require_var("IDENTITY_A_SECRET")?,
            ),
            Identity::new(
                require_var("IDENTITY_B_NAME")?,
                require_var("IDENTITY_B_SECRET")?,
            ),
        )?;

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        Ok(Self {
            http_addr,
            db_path,
            pair,
        })
    }
}

fn default_http_addr() -> SocketAddr {
    ([0, 0, 0, 0], 8080).into()
}

fn parse_http_addr(raw: &str) -> Option<SocketAddr> {
    raw.trim().parse().ok()
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
