//! Generic addressable remote entity.
//!
//! # Responsibility
//! - Hold the client-side view of one remote entity: path, title, staged
//!   attribute changes and the last fetched attribute snapshot.
//! - Stage attribute changes locally until a commit.
//!
//! # Invariants
//! - `title` equals the final segment of `path`.
//! - Only the commit/rename flow in `service` rewrites `path`/`title`.

use crate::model::path::{last_segment, replace_last_segment};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute name to value mapping used for staged and committed changes.
pub type Args = BTreeMap<String, Value>;

/// Client-side proxy for one remote entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    path: String,
    title: String,
    pending: Args,
    content: Args,
}

impl Entity {
    /// Wraps an entity path returned by the server.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let title = last_segment(&path).to_string();
        Self {
            path,
            title,
            pending: Args::new(),
            content: Args::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Stages one attribute change without any I/O.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.pending.insert(name.into(), value.into());
    }

    /// Returns all staged attribute changes.
    pub fn pending(&self) -> &Args {
        &self.pending
    }

    /// Returns one staged attribute value.
    pub fn staged(&self, name: &str) -> Option<&Value> {
        self.pending.get(name)
    }

    /// Returns the last attribute snapshot read by a refresh.
    pub fn content(&self) -> &Args {
        &self.content
    }

    /// Staged attributes overlaid with `changes`; `changes` wins on conflict.
    pub(crate) fn merged_with(&self, changes: &Args) -> Args {
        let mut merged = self.pending.clone();
        merged.extend(changes.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub(crate) fn replace_content(&mut self, content: Args) {
        self.content = content;
    }

    /// Renames the local identity. Keeps `title == last_segment(path)`.
    pub(crate) fn rename(&mut self, identifier: &str) {
        self.path = replace_last_segment(&self.path, identifier);
        self.title = identifier.to_string();
    }
}
