mod embedded;

use embedded::migrations;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params, types::ValueRef};

use std::path::PathBuf;

use crate::{
    error::{Result, StoreError},
    models::{Note, SchemaInfo},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Closed,
    Open,
    Failed,
}

pub struct Repository {
    location: Option<PathBuf>,
    conn: Option<Connection>,
    state: StoreState,
}

impl Repository {
    /// `None` keeps the data in memory.
    pub const fn new(location: Option<PathBuf>) -> Self {
        Self {
            location,
            conn: None,
            state: StoreState::Closed,
        }
    }

    pub const fn state(&self) -> StoreState {
        self.state
    }

    /// Once opening has failed the repository stays failed for the session.
    pub fn open(&mut self) -> Result<()> {
        match self.state {
            StoreState::Open => return Ok(()),
            StoreState::Failed => {
                return Err(StoreError::OpenFailed(
                    "store failed earlier in this session".to_string(),
                ));
            }
            StoreState::Closed => {}
        }

        match self.connect() {
            Ok(conn) => {
                self.conn = Some(conn);
                self.state = StoreState::Open;
                tracing::info!(location = ?self.location, "Note store opened");
                Ok(())
            }
            Err(e) => {
                self.state = StoreState::Failed;
                tracing::error!("Failed to open note store: {e}");
                Err(e)
            }
        }
    }

    fn connect(&self) -> Result<Connection> {
        let mut conn = match &self.location {
            Some(path) => Connection::open(path),
            None => Connection::open_in_memory(),
        }
        .map_err(StoreError::open)?;

        let migrations_report = migrations::runner()
            .run(&mut conn)
            .map_err(StoreError::open)?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(conn)
    }

    fn reader(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| StoreError::ReadFailed("store is not open".to_string()))
    }

    fn writer(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| StoreError::WriteFailed("store is not open".to_string()))
    }

    pub fn insert_note(&self, title: &str, content: &str, timestamp: DateTime<Utc>) -> Result<i64> {
        let conn = self.writer()?;
        conn.execute(
            "INSERT INTO notes (title, content, timestamp) VALUES (?1, ?2, ?3)",
            params![title, content, format_timestamp(timestamp)],
        )
        .map_err(StoreError::write)?;

        Ok(conn.last_insert_rowid())
    }

    pub fn update_note(
        &self,
        id: i64,
        title: &str,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<bool> {
        let conn = self.writer()?;

        let previous = conn
            .query_row(
                "SELECT id, title, content, timestamp FROM notes WHERE id = ?1",
                params![id],
                note_from_row,
            )
            .optional()
            .map_err(StoreError::write)?;

        let Some(previous) = previous else {
            return Ok(false);
        };

        // Never move a note backwards in time if the wall clock stepped back.
        let timestamp = previous.timestamp.map_or(timestamp, |prev| prev.max(timestamp));

        let rows = conn
            .execute(
                "UPDATE notes SET title = ?1, content = ?2, timestamp = ?3 WHERE id = ?4",
                params![title, content, format_timestamp(timestamp), id],
            )
            .map_err(StoreError::write)?;

        Ok(rows == 1)
    }

    pub fn delete_note(&self, id: i64) -> Result<bool> {
        let rows = self
            .writer()?
            .execute("DELETE FROM notes WHERE id = ?1", params![id])
            .map_err(StoreError::write)?;

        Ok(rows == 1)
    }

    pub fn get_one_note(&self, id: i64) -> Result<Option<Note>> {
        self.reader()?
            .query_row(
                "SELECT id, title, content, timestamp FROM notes WHERE id = ?1",
                params![id],
                note_from_row,
            )
            .optional()
            .map_err(StoreError::read)
    }

    pub fn get_all_notes(&self) -> Result<Vec<Note>> {
        let conn = self.reader()?;
        let mut stmt = conn
            .prepare("SELECT id, title, content, timestamp FROM notes")
            .map_err(StoreError::read)?;

        let rows = stmt.query_map([], note_from_row).map_err(StoreError::read)?;

        let mut vec: Vec<Note> = Vec::new();

        for row in rows {
            vec.push(row.map_err(StoreError::read)?);
        }

        Ok(vec)
    }

    pub fn schema_version(&self) -> Result<Option<i64>> {
        self.reader()?
            .query_row(
                "SELECT MAX(version) FROM refinery_schema_history",
                [],
                |row| row.get::<_, Option<i64>>(0),
            )
            .map_err(StoreError::read)
    }

    pub fn schema_info(&self) -> Result<SchemaInfo> {
        let conn = self.reader()?;

        Ok(SchemaInfo {
            version: self.schema_version()?,
            collections: schema_objects(conn, "table")?,
            indexes: schema_objects(conn, "index")?,
        })
    }
}

fn schema_objects(conn: &Connection, kind: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = ?1 AND tbl_name = 'notes' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )
        .map_err(StoreError::read)?;

    let names = stmt
        .query_map(params![kind], |row| row.get::<_, String>(0))
        .map_err(StoreError::read)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(StoreError::read)?;

    Ok(names)
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    // Tolerate rows written by other tools: non-text timestamps read as missing.
    let timestamp = match row.get_ref("timestamp")? {
        ValueRef::Text(raw) => std::str::from_utf8(raw).ok().and_then(parse_timestamp),
        _ => None,
    };

    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        timestamp,
    })
}
