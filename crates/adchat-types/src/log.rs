//! Persisted question/answer log entries.
//!
//! The backend stores every turn as one row. These types are read-only
//! inputs; converting them into display messages is the job of the log
//! adapter in `adchat-core`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::subject::{lenient_id, SubjectId};

/// One persisted turn.
///
/// An empty `question` marks a system-initiated turn (the opening greeting).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(alias = "id", alias = "entry_id", deserialize_with = "entry_id")]
    pub entry_id: i64,
    #[serde(default, alias = "adId", alias = "subject_id", alias = "ad_id")]
    pub subject_id: Option<SubjectId>,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        alias = "userId",
        alias = "owner_id",
        alias = "user_id"
    )]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub question: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub answer: String,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<CreatedAt>,
}

impl LogEntry {
    /// Whether this entry carries a user question (trimmed, non-empty).
    pub fn has_question(&self) -> bool {
        !self.question.trim().is_empty()
    }

    pub fn has_answer(&self) -> bool {
        !self.answer.trim().is_empty()
    }

    /// The parsed creation time, if the raw value is understood.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_ref().and_then(CreatedAt::parse)
    }
}

/// Entry ids arrive as numbers or as numeric strings.
fn entry_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawEntryId {
        Number(i64),
        Text(String),
    }

    match RawEntryId::deserialize(deserializer)? {
        RawEntryId::Number(n) => Ok(n),
        RawEntryId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("entry id {text:?} is not an integer"))),
    }
}

/// `null` question or answer means the side is absent.
fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw `createdAt` value as sent by the backend.
///
/// Kept unparsed so a single odd timestamp never fails decoding of the
/// whole log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedAt {
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    Text(String),
    Other(serde_json::Value),
}

impl CreatedAt {
    /// Parse into a UTC instant.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.fff]` (taken as UTC) and
    /// epoch milliseconds. Anything else is `None`.
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        match self {
            CreatedAt::EpochMillis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            CreatedAt::Text(text) => {
                let text = text.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                    return Some(dt.with_timezone(&Utc));
                }
                ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                    .map(|naive| naive.and_utc())
            }
            CreatedAt::Other(_) => None,
        }
    }
}
