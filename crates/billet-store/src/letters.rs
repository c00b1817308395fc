//! The append-only letter log.
//!
//! Two operations exist: load the whole log in insertion order and append
//! one letter to its end. There is deliberately no update or delete.

use billet_shared::types::{parse_stamp, Letter, STAMP_FORMAT};
use rusqlite::params;

use crate::database::Database;
use crate::error::{Result, StoreError};

/// Columns the `letters` table must carry to be readable.
const EXPECTED_COLUMNS: [&str; 4] = ["sent_at", "author", "title", "body"];

impl Database {
    /// Append one letter to the end of the log.
    ///
    /// A single-row INSERT is atomic in SQLite: either the row becomes
    /// visible in full or the call errors and the log is unchanged.
    pub fn append_letter(&self, letter: &Letter) -> Result<()> {
        self.verify_schema()?;
        self.conn().execute(
            "INSERT INTO letters (sent_at, author, title, body)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                letter.sent_at.format(STAMP_FORMAT).to_string(),
                letter.author,
                letter.title,
                letter.body,
            ],
        )?;
        Ok(())
    }

    /// Load the full log in insertion order (oldest first).
    ///
    /// An empty or freshly created table yields `Ok(vec![])`; a table with
    /// missing columns yields [`StoreError::MalformedSchema`]. The two
    /// cases are surfaced differently on purpose.
    pub fn load_all(&self) -> Result<Vec<Letter>> {
        self.verify_schema()?;

        let mut stmt = self.conn().prepare(
            "SELECT sent_at, author, title, body
             FROM letters
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], row_to_letter)?;

        let mut letters = Vec::new();
        for row in rows {
            letters.push(row?);
        }
        Ok(letters)
    }

    /// Check the `letters` table carries every expected column.
    ///
    /// The initial migration uses `CREATE TABLE IF NOT EXISTS`, so a
    /// pre-existing table of the wrong shape survives it; this catches
    /// that case before any read or write.
    fn verify_schema(&self) -> Result<()> {
        let mut stmt = self.conn().prepare("PRAGMA table_info(letters)")?;
        let mut columns = Vec::new();
        let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
        for row in rows {
            columns.push(row?);
        }

        for expected in EXPECTED_COLUMNS {
            if !columns.iter().any(|c| c == expected) {
                return Err(StoreError::MalformedSchema(expected.to_string()));
            }
        }
        Ok(())
    }
}

/// Map a `rusqlite::Row` to a [`Letter`].
fn row_to_letter(row: &rusqlite::Row<'_>) -> rusqlite::Result<Letter> {
    let stamp: String = row.get(0)?;
    let author: String = row.get(1)?;
    let title: String = row.get(2)?;
    let body: String = row.get(3)?;

    let sent_at = parse_stamp(&stamp).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Letter {
        sent_at,
        author,
        title,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_shared::types::minute_resolution;
    use chrono::Utc;

    fn open_temp() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("letters.db")).unwrap();
        (dir, db)
    }

    fn letter(author: &str, title: &str, body: &str) -> Letter {
        Letter {
            sent_at: minute_resolution(Utc::now()),
            author: author.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    #[test]
    fn absent_store_reads_as_empty() {
        let (_dir, db) = open_temp();
        assert!(db.load_all().unwrap().is_empty());
    }

    #[test]
    fn append_then_load_preserves_insertion_order() {
        let (_dir, db) = open_temp();

        let first = letter("A", "One", "first");
        let second = letter("B", "Two", "second");
        let third = letter("A", "Three", "third");

        db.append_letter(&first).unwrap();
        db.append_letter(&second).unwrap();
        db.append_letter(&third).unwrap();

        let all = db.load_all().unwrap();
        assert_eq!(all, vec![first, second, third]);
    }

    #[test]
    fn body_newlines_survive_round_trip() {
        let (_dir, db) = open_temp();

        let sent = letter("A", "Lines", "My Dearest,\n\nYours,\nA");
        db.append_letter(&sent).unwrap();

        let all = db.load_all().unwrap();
        assert_eq!(all[0].body, "My Dearest,\n\nYours,\nA");
    }

    #[test]
    fn malformed_table_is_not_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letters.db");

        // Simulate an old or foreign file: a letters table without the
        // expected columns, already stamped with the current version.
        {
            let conn = rusqlite::Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE letters (wrong TEXT)")
                .unwrap();
            conn.pragma_update(None, "user_version", 1).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        match db.load_all() {
            Err(StoreError::MalformedSchema(col)) => assert_eq!(col, "sent_at"),
            other => panic!("expected MalformedSchema, got {other:?}"),
        }
    }

    #[test]
    fn append_refuses_malformed_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letters.db");

        {
            let conn = rusqlite::Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE letters (sent_at TEXT, author TEXT)")
                .unwrap();
            conn.pragma_update(None, "user_version", 1).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        let err = db.append_letter(&letter("A", "T", "B")).unwrap_err();
        assert!(matches!(err, StoreError::MalformedSchema(_)));
    }
}
