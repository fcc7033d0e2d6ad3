//! Entity persistence contract and the local SQLite store.
//!
//! # Responsibility
//! - Define the backend seam every entity commit goes through.
//! - Provide an offline SQLite backend that applies the same persist and
//!   rename semantics as the management endpoint.
//!
//! # Invariants
//! - A commit either applies every attribute or none of them.
//! - Setting `restrictToHost` moves the entity to its renamed identifier.

use crate::db::DbError;
use crate::model::entity::Args;
use crate::model::input::{attribute_text, RESTRICT_TO_HOST};
use crate::model::path::{last_segment, port_from_title, renamed_identifier, replace_last_segment};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PersistResult<T> = Result<T, PersistError>;

/// Failures surfaced by an entity backend commit or fetch.
#[derive(Debug)]
pub enum PersistError {
    /// No entity exists at the path.
    NotFound(String),
    /// Target path of a create or rename is already taken.
    Conflict(String),
    /// Backend refused the change (server-side validation).
    Rejected(String),
    Db(DbError),
    InvalidData(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "entity not found: {path}"),
            Self::Conflict(path) => write!(f, "entity already exists: {path}"),
            Self::Rejected(message) => write!(f, "entity update rejected: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored entity data: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Attribute snapshot of one entity as stored by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub path: String,
    pub title: String,
    pub attributes: Args,
}

/// Persistence seam for entity commits.
///
/// Transport, authentication and retries live behind implementations.
pub trait EntityBackend {
    /// Persists `changes` for the entity at `path`.
    fn commit(&self, path: &str, changes: &Args) -> PersistResult<()>;
    /// Reads the current attributes of the entity at `path`.
    fn fetch(&self, path: &str) -> PersistResult<EntitySnapshot>;
}

impl<B: EntityBackend + ?Sized> EntityBackend for &B {
    fn commit(&self, path: &str, changes: &Args) -> PersistResult<()> {
        (**self).commit(path, changes)
    }

    fn fetch(&self, path: &str) -> PersistResult<EntitySnapshot> {
        (**self).fetch(path)
    }
}

/// SQLite-backed entity store.
///
/// Offline stand-in for the management endpoint, not a cache of it: its
/// rename on `restrictToHost` plays the server's part, and callers still
/// follow it locally through `InputService::update`.
pub struct SqliteEntityBackend<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntityBackend<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Seeds one entity row; the title is the final path segment.
    pub fn insert_entity(&self, path: &str, attributes: &Args) -> PersistResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        if entity_title(&tx, path)?.is_some() {
            return Err(PersistError::Conflict(path.to_string()));
        }
        tx.execute(
            "INSERT INTO entities (path, title) VALUES (?1, ?2);",
            params![path, last_segment(path)],
        )?;
        upsert_attributes(&tx, path, attributes)?;
        tx.commit()?;
        Ok(())
    }

    /// Returns whether an entity exists at `path`.
    pub fn contains(&self, path: &str) -> PersistResult<bool> {
        Ok(entity_title(self.conn, path)?.is_some())
    }
}

impl EntityBackend for SqliteEntityBackend<'_> {
    fn commit(&self, path: &str, changes: &Args) -> PersistResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let title =
            entity_title(&tx, path)?.ok_or_else(|| PersistError::NotFound(path.to_string()))?;
        upsert_attributes(&tx, path, changes)?;

        if let Some(host) = changes.get(RESTRICT_TO_HOST).and_then(attribute_text) {
            let port =
                port_from_title(&title).map_err(|err| PersistError::Rejected(err.to_string()))?;
            let identifier = renamed_identifier(port, &host);
            let new_path = replace_last_segment(path, &identifier);
            if new_path != path {
                if entity_title(&tx, &new_path)?.is_some() {
                    return Err(PersistError::Conflict(new_path));
                }
                tx.execute(
                    "UPDATE entities SET path = ?1, title = ?2 WHERE path = ?3;",
                    params![new_path, identifier, path],
                )?;
                debug!("event=store_rename module=repo status=ok attributes={}", changes.len());
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn fetch(&self, path: &str) -> PersistResult<EntitySnapshot> {
        let title =
            entity_title(self.conn, path)?.ok_or_else(|| PersistError::NotFound(path.to_string()))?;

        let mut stmt = self.conn.prepare(
            "SELECT name, value_json FROM entity_attributes WHERE entity_path = ?1 ORDER BY name;",
        )?;
        let rows = stmt.query_map([path], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut attributes = Args::new();
        for row in rows {
            let (name, value_json) = row?;
            let value = serde_json::from_str(&value_json).map_err(|err| {
                PersistError::InvalidData(format!("attribute `{name}` is not JSON: {err}"))
            })?;
            attributes.insert(name, value);
        }

        Ok(EntitySnapshot {
            path: path.to_string(),
            title,
            attributes,
        })
    }
}

fn entity_title(conn: &Connection, path: &str) -> PersistResult<Option<String>> {
    let title = conn
        .query_row(
            "SELECT title FROM entities WHERE path = ?1;",
            [path],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(title)
}

fn upsert_attributes(conn: &Connection, path: &str, attributes: &Args) -> PersistResult<()> {
    for (name, value) in attributes {
        let value_json = serde_json::to_string(value).map_err(|err| {
            PersistError::InvalidData(format!("attribute `{name}` cannot be encoded: {err}"))
        })?;
        conn.execute(
            "INSERT INTO entity_attributes (entity_path, name, value_json)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(entity_path, name) DO UPDATE SET value_json = excluded.value_json;",
            params![path, name, value_json],
        )?;
    }
    Ok(())
}
