//! # notes-store
//!
//! Local persistence for short text notes: one `notes` collection in an
//! embedded SQLite database, keyed by an auto-assigned id and indexed on
//! `title`.
//!
//! [`NoteService`] is the store itself (`init`, `upsert`, `remove`, `get`,
//! `list`). [`handlers`] holds the per-session form state a front end drives
//! it with.
//!
//! ```rust,no_run
//! use notes_store::{NoteService, StoreConfig, UpsertNoteRequest};
//!
//! # async fn run() -> notes_store::Result<()> {
//! let config = notes_store::config::load_config()?;
//! notes_store::logging::init(&config);
//!
//! let service = NoteService::from_config(&config);
//! service.init().await?;
//! service.upsert(UpsertNoteRequest::new("Work", "report")).await?;
//! let _newest_first = service.list("").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod repository;
pub mod service;

pub use config::StoreConfig;
pub use dto::UpsertNoteRequest;
pub use error::{Result, StoreError};
pub use models::{Note, SchemaInfo};
pub use repository::{Repository, StoreState};
pub use service::NoteService;
