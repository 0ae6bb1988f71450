use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

pub const UNKNOWN_SOURCE: &str = "Unknown";

fn unknown_source() -> String {
    UNKNOWN_SOURCE.to_string()
}

/// A field value that is either text or anything else (null, number, object).
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientField {
    Text(String),
    Other(IgnoredAny),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientField::deserialize(deserializer)? {
        LenientField::Text(text) => Some(text),
        LenientField::Other(_) => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn source_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_else(unknown_source))
}

/// RFC 3339 timestamps are kept; anything else reads as the collection time.
fn timestamp_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map_or_else(Utc::now, |ts| ts.with_timezone(&Utc)))
}

/// One unit of externally collected text (a search result, a feed item, a post).
///
/// Records are never mutated after collection. A record with missing or
/// malformed content is kept and scanned as empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub query: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub content: String,
    #[serde(default = "unknown_source", deserialize_with = "source_or_unknown")]
    pub source: String,
    #[serde(default = "Utc::now", deserialize_with = "timestamp_or_now")]
    pub timestamp: DateTime<Utc>,
}

impl TextRecord {
    pub fn new(
        query: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            content: content.into(),
            source: source.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
