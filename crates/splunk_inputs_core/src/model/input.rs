//! Data input entity.
//!
//! # Responsibility
//! - Specialize `Entity` with input-only accessors (kind, host restriction).
//! - Resolve the intended host restriction from changes and staged values.
//!
//! # Invariants
//! - Kind is never stored; it is derived from the current path.
//! - A JSON `null` host value means "unchanged"; `""` means "remove".

use crate::model::entity::{Args, Entity};
use crate::model::input_kind::InputKind;
use crate::model::path::AddressError;
use serde_json::Value;

/// Attribute name the management API uses for the host restriction.
pub const RESTRICT_TO_HOST: &str = "restrictToHost";

/// Client-side proxy for one data input.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    entity: Entity,
}

impl Input {
    /// Wraps an input path returned by the server.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            entity: Entity::new(path),
        }
    }

    pub fn path(&self) -> &str {
        self.entity.path()
    }

    pub fn title(&self) -> &str {
        self.entity.title()
    }

    /// Classifies this input from its current path.
    pub fn kind(&self) -> Result<InputKind, AddressError> {
        InputKind::classify(self.entity.path())
    }

    /// Stages a host restriction change; an empty host removes it.
    pub fn set_restrict_to_host(&mut self, host: impl Into<String>) {
        self.entity.set(RESTRICT_TO_HOST, host.into());
    }

    /// Host restriction from the last refreshed snapshot.
    pub fn restrict_to_host(&self) -> Option<String> {
        self.entity
            .content()
            .get(RESTRICT_TO_HOST)
            .and_then(attribute_text)
    }

    /// Resolves the host restriction a commit with `changes` would apply.
    ///
    /// Explicit changes take precedence over staged values. Returns `None`
    /// when the host restriction is left unchanged.
    pub fn intended_host(&self, changes: &Args) -> Option<String> {
        let value = if changes.contains_key(RESTRICT_TO_HOST) {
            changes.get(RESTRICT_TO_HOST)
        } else {
            self.entity.staged(RESTRICT_TO_HOST)
        };
        value.and_then(attribute_text)
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

/// Text form of an attribute value; `null` has none.
pub(crate) fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
