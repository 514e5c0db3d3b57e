use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Create-or-replace request for a note.
///
/// With `id` set the existing record is fully replaced; without it a new
/// record is created. There is no timestamp field: the store always stamps
/// the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertNoteRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
}

impl UpsertNoteRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the trimmed title and content, rejecting blank values.
    pub fn validated(&self) -> Result<(String, String)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidNote("title must not be empty"));
        }

        let content = self.content.trim();
        if content.is_empty() {
            return Err(StoreError::InvalidNote("content must not be empty"));
        }

        Ok((title.to_owned(), content.to_owned()))
    }
}
