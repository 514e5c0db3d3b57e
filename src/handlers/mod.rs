//! Session glue for a note-taking front end.
//!
//! A view owns one [`NoteForm`] per session instead of process-wide state,
//! supplies a [`Confirm`] capability for deletes, and turns listed notes
//! into cards with [`render`].

pub mod form;
pub mod render;

pub use form::{Confirm, DeleteOutcome, FormOutcome, NoteForm};
pub use render::{NoteCard, NotesDisplay, format_timestamp, render, render_result};
