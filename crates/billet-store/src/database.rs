//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees
//! that migrations are run before any other operation, so opening an
//! absent file yields a valid empty log rather than an error.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the default letters database.
    ///
    /// The database file is placed in the platform-appropriate data
    /// directory:
    /// - Linux:   `~/.local/share/billet/letters.db`
    /// - macOS:   `~/Library/Application Support/com.billet.billet/letters.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\billet\billet\data\letters.db`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "billet", "billet").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("letters.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// Used by tests and by deployments that set an explicit store
    /// location instead of the platform data directory.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        // Run schema migrations.
        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    ///
    /// Callers should prefer the typed helpers in [`crate::letters`], but
    /// direct access is occasionally needed for ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letters.db");
        assert!(!path.exists());

        let db = Database::open_at(&path).expect("should open");
        assert!(db.path().is_some());
        assert!(path.exists());
    }
}
