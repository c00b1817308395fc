//! v001 -- Initial schema creation.
//!
//! Creates the single `letters` table. The rowid `id` records insertion
//! order, which the rest of the system interprets as chronological order.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS letters (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    sent_at TEXT NOT NULL,                     -- YYYY-MM-DD HH:MM
    author  TEXT NOT NULL,
    title   TEXT NOT NULL,
    body    TEXT NOT NULL                      -- newlines preserved
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
