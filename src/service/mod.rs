use crate::{
    config::StoreConfig,
    dto::UpsertNoteRequest,
    error::{Result, StoreError},
    models::{Note, SchemaInfo},
    repository::Repository,
};

use chrono::Utc;

use std::sync::Arc;

/// Each call locks the repository and runs once on the blocking pool.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<Repository>>,
}

impl NoteService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<Repository>>) -> Self {
        Self { repo }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        let repo = Repository::new(config.db_path.clone());
        Self::new(Arc::new(tokio::sync::Mutex::new(repo)))
    }

    async fn run<T, F>(&self, op: F, on_abort: fn(String) -> StoreError) -> Result<T>
    where
        F: FnOnce(&mut Repository) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut repo = Arc::clone(&self.repo).lock_owned().await;

        tokio::task::spawn_blocking(move || op(&mut *repo))
            .await
            .map_err(|e| on_abort(e.to_string()))?
    }

    pub async fn init(&self) -> Result<()> {
        self.run(Repository::open, StoreError::OpenFailed).await
    }

    /// Replacing an id that does not exist writes nothing and returns that id.
    pub async fn upsert(&self, request: UpsertNoteRequest) -> Result<i64> {
        let (title, content) = request.validated()?;
        let timestamp = Utc::now();

        let result = self
            .run(
                move |repo| match request.id {
                    Some(id) => {
                        if !repo.update_note(id, &title, &content, timestamp)? {
                            tracing::warn!(id, "update matched no note, nothing written");
                        }
                        Ok(id)
                    }
                    None => repo.insert_note(&title, &content, timestamp),
                },
                StoreError::WriteFailed,
            )
            .await;

        match &result {
            Ok(id) => tracing::debug!(id, "note saved"),
            Err(e) => tracing::error!("failed to save note: {e}"),
        }

        result
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        let deleted = self
            .run(move |repo| repo.delete_note(id), StoreError::WriteFailed)
            .await
            .inspect_err(|e| tracing::error!("failed to delete note {id}: {e}"))?;

        tracing::debug!(id, deleted, "note delete finished");

        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Note>> {
        self.run(move |repo| repo.get_one_note(id), StoreError::ReadFailed)
            .await
            .inspect_err(|e| tracing::error!("failed to get note {id}: {e}"))
    }

    pub async fn list(&self, query: &str) -> Result<Vec<Note>> {
        let notes = self
            .run(|repo| repo.get_all_notes(), StoreError::ReadFailed)
            .await
            .inspect_err(|e| tracing::error!("failed to load notes: {e}"))?;

        let mut notes = filter_by_title(notes, query);
        sort_newest_first(&mut notes);

        tracing::debug!(query, count = notes.len(), "notes listed");

        Ok(notes)
    }

    pub async fn schema_info(&self) -> Result<SchemaInfo> {
        self.run(|repo| repo.schema_info(), StoreError::ReadFailed)
            .await
    }
}

fn filter_by_title(notes: Vec<Note>, query: &str) -> Vec<Note> {
    if query.is_empty() {
        return notes;
    }

    let needle = query.to_lowercase();
    notes
        .into_iter()
        .filter(|note| note.title.to_lowercase().contains(&needle))
        .collect()
}

// Missing timestamps compare lowest; equal timestamps fall back to the newer id.
fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, TimeZone};

    fn at(secs: i64) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(secs, 0).single()
    }

    fn note(id: i64, title: &str, timestamp: Option<DateTime<Utc>>) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: "body".to_string(),
            timestamp,
        }
    }

    fn ids(notes: &[Note]) -> Vec<i64> {
        notes.iter().map(|n| n.id).collect()
    }

    #[test]
    fn sorts_by_timestamp_descending() {
        let mut notes = vec![
            note(1, "a", at(100)),
            note(2, "b", at(300)),
            note(3, "c", at(200)),
        ];
        sort_newest_first(&mut notes);
        assert_eq!(ids(&notes), vec![2, 3, 1]);
    }

    #[test]
    fn missing_timestamps_sort_last() {
        let mut notes = vec![note(1, "a", None), note(2, "b", at(1)), note(3, "c", None)];
        sort_newest_first(&mut notes);
        assert_eq!(ids(&notes), vec![2, 3, 1]);
    }

    #[test]
    fn equal_timestamps_prefer_higher_id() {
        let mut notes = vec![note(4, "a", at(5)), note(9, "b", at(5))];
        sort_newest_first(&mut notes);
        assert_eq!(ids(&notes), vec![9, 4]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let notes = vec![
            note(1, "Shopping", at(1)),
            note(2, "Work", at(2)),
            note(3, "WORKSHOP", at(3)),
        ];
        assert_eq!(ids(&filter_by_title(notes.clone(), "shop")), vec![1, 3]);
        assert_eq!(ids(&filter_by_title(notes.clone(), "ORK")), vec![2, 3]);
        assert_eq!(ids(&filter_by_title(notes, "")), vec![1, 2, 3]);
    }

    #[test]
    fn filter_ignores_content() {
        let notes = vec![note(1, "Work", at(1))];
        assert!(filter_by_title(notes, "body").is_empty());
    }
}
