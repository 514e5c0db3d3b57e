use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted note record.
///
/// `timestamp` is `None` only for rows whose stored value is missing or not
/// a valid RFC 3339 string; such notes sort as the oldest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Snapshot of the on-disk schema, as created by the embedded migrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaInfo {
    pub version: Option<i64>,
    pub collections: Vec<String>,
    pub indexes: Vec<String>,
}
