//! Generic entity commit and refresh use cases.
//!
//! # Responsibility
//! - Merge staged attributes with explicit changes and persist them.
//! - Reload attribute snapshots after out-of-band changes.
//!
//! # Invariants
//! - An empty merged change set never reaches the backend.
//! - Staged attributes are cleared only after a confirmed commit.

use crate::model::entity::{Args, Entity};
use crate::repo::entity_repo::{EntityBackend, PersistResult};
use log::{error, info};
use std::time::Instant;

/// Use-case service wrapping an entity backend.
pub struct EntityService<B: EntityBackend> {
    backend: B,
}

impl<B: EntityBackend> EntityService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Persists staged attributes overlaid with `changes`.
    ///
    /// Backend failures are returned unchanged and leave staged attributes
    /// in place for a later retry by the caller.
    pub fn commit(&self, entity: &mut Entity, changes: &Args) -> PersistResult<()> {
        let merged = entity.merged_with(changes);
        if merged.is_empty() {
            return Ok(());
        }

        let started_at = Instant::now();
        match self.backend.commit(entity.path(), &merged) {
            Ok(()) => {
                entity.clear_pending();
                info!(
                    "event=entity_commit module=service status=ok attributes={} duration_ms={}",
                    merged.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=entity_commit module=service status=error attributes={} duration_ms={} error={}",
                    merged.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Replaces the entity's attribute snapshot with the backend's.
    pub fn refresh(&self, entity: &mut Entity) -> PersistResult<()> {
        let snapshot = self.backend.fetch(entity.path())?;
        entity.replace_content(snapshot.attributes);
        Ok(())
    }
}
