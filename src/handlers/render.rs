use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::{error::Result, models::Note};

pub const EMPTY_MESSAGE: &str = "No notes found. Create your first note!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCard {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Local time the note was last saved, empty when unknown.
    pub meta: String,
}

impl From<&Note> for NoteCard {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            meta: format_timestamp(note.timestamp),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesDisplay {
    Empty(&'static str),
    Cards(Vec<NoteCard>),
    /// The list could not be loaded; no partial or stale cards are shown.
    Failed(String),
}

pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

pub fn render(notes: &[Note]) -> NotesDisplay {
    if notes.is_empty() {
        return NotesDisplay::Empty(EMPTY_MESSAGE);
    }

    NotesDisplay::Cards(notes.iter().map(NoteCard::from).collect())
}

pub fn render_result(result: &Result<Vec<Note>>) -> NotesDisplay {
    match result {
        Ok(notes) => render(notes),
        Err(e) => NotesDisplay::Failed(e.to_string()),
    }
}
