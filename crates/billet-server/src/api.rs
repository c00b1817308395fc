use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use billet_shared::{IdentityPair, Letter};

use crate::error::ServerError;
use crate::service::LetterService;
use crate::sessions::{AuthedUser, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub service: LetterService,
    pub sessions: SessionStore,
    pub pair: Arc<IdentityPair>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/letters", get(archive).post(compose))
        .route("/letters/latest", get(latest_letter))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Deserialize)]
struct LoginRequest {
    secret: String,
}

#[derive(Serialize)]
struct LoginResponse {
    token: Uuid,
    identity: String,
    partner: String,
}

#[derive(Serialize)]
struct LatestResponse {
    /// `null` when the partner has not written yet.
    letter: Option<Letter>,
}

#[derive(Serialize)]
struct ArchiveResponse {
    letters: Vec<Letter>,
}

#[derive(Deserialize)]
struct ComposeRequest {
    title: String,
    body: String,
}

#[derive(Serialize)]
struct ComposeResponse {
    letter: Letter,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Exchange a secret phrase for a session token.
///
/// The secret itself is never logged, only the resolved identity.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServerError> {
    let (token, user) = state.sessions.log_in(&req.secret, &state.pair).await?;

    info!(identity = %user.identity, "session opened");

    Ok(Json(LoginResponse {
        token,
        identity: user.identity,
        partner: user.partner,
    }))
}

async fn logout(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let token = bearer_token(&headers)?;
    let existed = state.sessions.log_out(token).await;
    Ok(Json(serde_json::json!({ "logged_out": existed })))
}

/// The latest letter authored by the session's partner.
async fn latest_letter(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<LatestResponse>, ServerError> {
    let user = authed(&headers, &state).await?;
    let letter = state.service.latest_from(&user.partner).await?;
    Ok(Json(LatestResponse { letter }))
}

/// The full archive, most recent first, both authors interleaved.
async fn archive(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<ArchiveResponse>, ServerError> {
    authed(&headers, &state).await?;
    let letters = state.service.archive_all().await?;
    Ok(Json(ArchiveResponse { letters }))
}

/// Compose a letter as the session identity.
async fn compose(
    headers: HeaderMap,
    State(state): State<AppState>,
    Json(req): Json<ComposeRequest>,
) -> Result<(StatusCode, Json<ComposeResponse>), ServerError> {
    let user = authed(&headers, &state).await?;
    let letter = state
        .service
        .compose(&user.identity, &req.title, &req.body)
        .await?;
    Ok((StatusCode::CREATED, Json(ComposeResponse { letter })))
}

/// Pull the bearer token out of the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<Uuid, ServerError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or(auth);
    token.parse().map_err(|_| ServerError::Unauthenticated)
}

/// Resolve the request's session token to an authenticated identity.
async fn authed(headers: &HeaderMap, state: &AppState) -> Result<AuthedUser, ServerError> {
    let token = bearer_token(headers)?;
    state
        .sessions
        .authed_user(token)
        .await
        .ok_or(ServerError::Unauthenticated)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
