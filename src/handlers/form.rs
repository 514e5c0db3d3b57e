use crate::{dto::UpsertNoteRequest, error::Result, models::Note, service::NoteService};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this note?";
pub const MISSING_FIELDS: &str = "Please enter both title and content";

/// User confirmation, provided by the view. The store never prompts.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// The note was written; `notes` is the refreshed, unfiltered list.
    Saved { id: i64, notes: Vec<Note> },
    /// Nothing was written; the message is meant for the user.
    Rejected(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Vec<Note>),
    Cancelled,
}

/// Form state for one session: the note being edited, if any.
pub struct NoteForm<C> {
    service: NoteService,
    editing: Option<i64>,
    confirm: C,
}

impl<C: Confirm> NoteForm<C> {
    pub const fn new(service: NoteService, confirm: C) -> Self {
        Self {
            service,
            editing: None,
            confirm,
        }
    }

    pub const fn service(&self) -> &NoteService {
        &self.service
    }

    pub const fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub const fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update Note"
        } else {
            "Save Note"
        }
    }

    /// Startup: open the store and load the initial list.
    pub async fn open(&self) -> Result<Vec<Note>> {
        self.service.init().await?;
        self.service.list("").await
    }

    pub async fn submit(&mut self, title: &str, content: &str) -> Result<FormOutcome> {
        let title = title.trim();
        let content = content.trim();

        if title.is_empty() || content.is_empty() {
            return Ok(FormOutcome::Rejected(MISSING_FIELDS));
        }

        let request = UpsertNoteRequest {
            id: self.editing,
            title: title.to_owned(),
            content: content.to_owned(),
        };

        // A failed write keeps the edit target so the user can resubmit.
        let id = self.service.upsert(request).await?;
        self.editing = None;

        let notes = self.service.list("").await?;
        Ok(FormOutcome::Saved { id, notes })
    }

    /// Loads a note into the form. Unknown ids leave the form untouched.
    pub async fn edit(&mut self, id: i64) -> Result<Option<Note>> {
        let note = self.service.get(id).await?;
        if note.is_some() {
            self.editing = Some(id);
        }
        Ok(note)
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }

    pub async fn delete(&mut self, id: i64) -> Result<DeleteOutcome> {
        if !self.confirm.confirm(DELETE_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.service.remove(id).await?;
        if self.editing == Some(id) {
            self.editing = None;
        }

        Ok(DeleteOutcome::Deleted(self.service.list("").await?))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Note>> {
        self.service.list(query).await
    }
}
