//! # billet-store
//!
//! SQLite-backed append-only letter log.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection` and provides two operations: load the full log
//! in insertion order, and append one letter to its end. Letters are never
//! updated or deleted; the archive is a permanent record.

pub mod database;
pub mod letters;
pub mod migrations;

mod error;

pub use database::Database;
pub use error::StoreError;
