use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use billet_shared::AuthError;
use billet_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The submitted secret phrase matched neither identity.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request carried no valid session token.
    #[error("Not logged in")]
    Unauthenticated,

    /// The letter failed validation; nothing was persisted.
    #[error("{0}")]
    Validation(String),

    /// The backing store failed. For a compose this means the letter was
    /// NOT saved, and the response must say so.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Auth(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            ServerError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            ServerError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ServerError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
