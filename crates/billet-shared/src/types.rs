//! The letter record and its timestamp conventions.
//!
//! Letters are immutable once created and only ever appended to the log.
//! Timestamps carry minute resolution: the original archive format stores
//! them as `YYYY-MM-DD HH:MM` strings, and we keep that on the wire and at
//! rest so old and new rows stay interchangeable.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format used in the persisted log and in API payloads.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single letter in the append-only log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Letter {
    /// When the letter was composed, minute resolution.
    #[serde(with = "stamp")]
    pub sent_at: DateTime<Utc>,
    /// Name of the identity that wrote the letter.
    pub author: String,
    /// Subject line, non-empty.
    pub title: String,
    /// Free-text content; line breaks and lightweight markup are stored
    /// verbatim and left for the presentation layer to render.
    pub body: String,
}

impl Letter {
    /// Render `sent_at` in the archive's `YYYY-MM-DD HH:MM` format.
    pub fn stamp(&self) -> String {
        self.sent_at.format(STAMP_FORMAT).to_string()
    }
}

/// Truncate a timestamp to minute resolution (seconds and below zeroed).
///
/// The unwraps cannot fail: zero is always a valid second/nanosecond.
pub fn minute_resolution(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .expect("zero second/nanosecond is always in range")
}

/// Parse a `YYYY-MM-DD HH:MM` stamp back into a UTC timestamp.
pub fn parse_stamp(s: &str) -> chrono::ParseResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), STAMP_FORMAT).map(|naive| naive.and_utc())
}

/// Serde adapter serializing timestamps in [`STAMP_FORMAT`].
pub mod stamp {
    use super::*;
    use serde::Deserializer;

    pub fn serialize<S: serde::Serializer>(
        dt: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format(STAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_stamp(&s).map_err(serde::de::Error::custom)
    }
}
