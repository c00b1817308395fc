//! Per-session authentication state.
//!
//! Each browser session gets its own [`Session`], keyed by an opaque
//! bearer token in the [`SessionStore`]. There is no process-wide "who
//! is logged in" global: two sessions can be authenticated as the two
//! different identities at the same time.
//!
//! The state machine is `Unauthenticated -> Authenticated(identity)`,
//! with logout transitioning back. A failed attempt leaves the state
//! untouched; there is no lockout or attempt counting.

use std::collections::HashMap;
use std::sync::Arc;

use billet_shared::{AuthError, IdentityPair};
use tokio::sync::Mutex;
use uuid::Uuid;

/// The identity a session is bound to, with its derived partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthedUser {
    pub identity: String,
    pub partner: String,
}

/// Authentication state of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(AuthedUser),
}

impl Session {
    /// Try to authenticate with a secret phrase.
    ///
    /// On a match the session binds to the corresponding identity and
    /// derives the partner; on no match the state is left as it was.
    pub fn authenticate(
        &mut self,
        secret: &str,
        pair: &IdentityPair,
    ) -> Result<AuthedUser, AuthError> {
        let (identity, partner) = pair.authenticate(secret).ok_or(AuthError)?;
        let user = AuthedUser {
            identity: identity.name.clone(),
            partner: partner.name.clone(),
        };
        *self = Session::Authenticated(user.clone());
        Ok(user)
    }

    /// Transition back to `Unauthenticated`.
    pub fn log_out(&mut self) {
        *self = Session::Unauthenticated;
    }

    /// The bound identity, if authenticated.
    pub fn user(&self) -> Option<&AuthedUser> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Unauthenticated => None,
        }
    }
}

/// Token-keyed map of live sessions.
///
/// Sessions are created on successful login and removed on logout.
/// Cloned handles share one `Arc`, so the router can keep a copy per
/// request without extra plumbing.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate and, on success, create a session for the matched
    /// identity. Failed attempts leave no session behind.
    pub async fn log_in(
        &self,
        secret: &str,
        pair: &IdentityPair,
    ) -> Result<(Uuid, AuthedUser), AuthError> {
        let mut session = Session::default();
        let user = session.authenticate(secret, pair)?;

        let token = Uuid::new_v4();
        self.sessions.lock().await.insert(token, session);
        Ok((token, user))
    }

    /// Destroy the session for `token`. Returns whether one existed.
    pub async fn log_out(&self, token: Uuid) -> bool {
        self.sessions.lock().await.remove(&token).is_some()
    }

    /// Resolve a token to its authenticated identity.
    pub async fn authed_user(&self, token: Uuid) -> Option<AuthedUser> {
        self.sessions
            .lock()
            .await
            .get(&token)
            .and_then(|s| s.user().cloned())
    }
}
