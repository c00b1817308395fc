//! The message service: reads and appends against the letter log.
//!
//! Every read re-fetches from the store; the log is never cached across
//! requests. The SQLite connection sits behind an async mutex so the two
//! writers cannot interleave within this process.

use std::sync::Arc;

use billet_shared::types::minute_resolution;
use billet_shared::Letter;
use billet_store::Database;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::ServerError;

/// Shared handle to the letter log.
#[derive(Clone)]
pub struct LetterService {
    db: Arc<Mutex<Database>>,
}

impl LetterService {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// The most recently appended letter authored by `identity`, or
    /// `None` if they have not written yet. An empty log is a normal
    /// state, not an error.
    pub async fn latest_from(&self, identity: &str) -> Result<Option<Letter>, ServerError> {
        let db = self.db.lock().await;
        let all = db.load_all()?;
        Ok(all.into_iter().rev().find(|l| l.author == identity))
    }

    /// The full log, most recent first.
    pub async fn archive_all(&self) -> Result<Vec<Letter>, ServerError> {
        let db = self.db.lock().await;
        let mut all = db.load_all()?;
        all.reverse();
        Ok(all)
    }

    /// Validate, stamp, and append a new letter.
    ///
    /// Validation happens before any store access, so a rejected letter
    /// has no side effect. A persistence failure is propagated as-is;
    /// the letter is then known not to be saved.
    pub async fn compose(
        &self,
        author: &str,
        title: &str,
        body: &str,
    ) -> Result<Letter, ServerError> {
        if title.trim().is_empty() || body.trim().is_empty() {
            return Err(ServerError::Validation(
                "A letter needs both a title and a message".to_string(),
            ));
        }

        let letter = Letter {
            sent_at: minute_resolution(Utc::now()),
            author: author.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        };

        let db = self.db.lock().await;
        db.append_letter(&letter)?;

        tracing::info!(author = %letter.author, title = %letter.title, "letter appended");
        Ok(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, LetterService) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("letters.db")).unwrap();
        (dir, LetterService::new(db))
    }

    #[tokio::test]
    async fn compose_appears_in_archive_with_stamped_fields() {
        let (_dir, service) = service();
        let before = minute_resolution(Utc::now());

        let letter = service
            .compose("A", "Morning", "Thinking of you")
            .await
            .unwrap();

        let after = minute_resolution(Utc::now());
        assert!(letter.sent_at >= before && letter.sent_at <= after);

        let archive = service.archive_all().await.unwrap();
        assert_eq!(archive, vec![letter]);
        assert_eq!(archive[0].author, "A");
        assert_eq!(archive[0].title, "Morning");
        assert_eq!(archive[0].body, "Thinking of you");
    }

    #[tokio::test]
    async fn latest_from_tracks_each_author_independently() {
        let (_dir, service) = service();

        let from_a = service.compose("A", "First", "from A").await.unwrap();
        assert_eq!(service.latest_from("A").await.unwrap(), Some(from_a));
        assert_eq!(service.latest_from("B").await.unwrap(), None);

        let from_b = service.compose("B", "Reply", "from B").await.unwrap();
        let newer_a = service.compose("A", "Again", "more from A").await.unwrap();

        assert_eq!(service.latest_from("A").await.unwrap(), Some(newer_a));
        assert_eq!(service.latest_from("B").await.unwrap(), Some(from_b));
    }

    #[tokio::test]
    async fn latest_from_empty_log_is_none_not_error() {
        let (_dir, service) = service();
        assert_eq!(service.latest_from("A").await.unwrap(), None);
    }

    #[tokio::test]
    async fn archive_is_most_recent_first() {
        let (_dir, service) = service();

        let m1 = service.compose("A", "M1", "one").await.unwrap();
        let m2 = service.compose("B", "M2", "two").await.unwrap();
        let m3 = service.compose("A", "M3", "three").await.unwrap();

        let archive = service.archive_all().await.unwrap();
        assert_eq!(archive, vec![m3, m2, m1]);
    }

    #[tokio::test]
    async fn empty_title_or_body_is_rejected_without_side_effect() {
        let (_dir, service) = service();

        for (title, body) in [("", "body"), ("title", ""), ("   ", "body"), ("title", "\n\t ")] {
            let err = service.compose("A", title, body).await.unwrap_err();
            assert!(matches!(err, ServerError::Validation(_)));
        }

        assert!(service.archive_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn compose_stamps_minute_resolution() {
        let (_dir, service) = service();
        let letter = service.compose("B", "Now", "time check").await.unwrap();
        assert_eq!(chrono::Timelike::second(&letter.sent_at), 0);
    }
}
