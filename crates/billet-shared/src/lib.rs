//! # billet-shared
//!
//! Domain types shared between the letter store and the HTTP server:
//! the [`Letter`] record, the fixed two-person [`IdentityPair`], and the
//! error taxonomy for authentication and configuration.

pub mod error;
pub mod identity;
pub mod types;

pub use error::{AuthError, PairError};
pub use identity::{Identity, IdentityPair};
pub use types::Letter;
