use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The full chat document: chat id to record.
///
/// A `BTreeMap` keeps the serialized key order stable, so writing back a
/// freshly loaded map reproduces the same bytes.
pub type ChatMap = BTreeMap<String, ChatRecord>;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing into the notebook
    User,
    /// The canned responder
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message
    pub role: Role,
    /// Free-form text, possibly carrying an analysis or question marker
    pub content: String,
    /// When the message was created
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a user message stamped now
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message stamped now
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Title shown for stored records that carry none
pub const UNNAMED_TITLE: &str = "Unnamed Chat";

fn unnamed_title() -> String {
    UNNAMED_TITLE.to_string()
}

/// A persisted chat session. The id is the key in [`ChatMap`].
///
/// Records written by hand or by older versions may lack `title` or
/// `timestamp`; those read back as [`UNNAMED_TITLE`] and the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Derived from the first user message
    #[serde(default = "unnamed_title")]
    pub title: String,
    /// Time of the last write
    #[serde(default, with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    /// Chronological message sequence
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Listing entry for a stored chat
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSummary {
    /// Chat id
    pub id: String,
    /// Computed title
    pub title: String,
    /// Time of the last write
    pub timestamp: DateTime<Utc>,
    /// Number of messages in the chat
    pub message_count: usize,
}

/// Compute a chat title from its messages.
///
/// Uses the first user message, cut to `max_chars` characters with a `...`
/// suffix when longer. Falls back to `default_title` when no user message
/// exists.
pub fn derive_title(messages: &[Message], max_chars: usize, default_title: &str) -> String {
    messages
        .iter()
        .find(|m| m.role == Role::User)
        .map(|m| truncate_with_ellipsis(&m.content, max_chars))
        .unwrap_or_else(|| default_title.to_string())
}

/// Cut `text` to `max_chars` characters, appending `...` if anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

/// ISO-8601 timestamps.
///
/// Written as RFC 3339 UTC with microseconds. Reading also accepts naive
/// timestamps without an offset, taken as local time.
pub(crate) mod iso8601 {
    use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
