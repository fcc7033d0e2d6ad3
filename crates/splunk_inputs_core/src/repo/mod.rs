//! Entity persistence contracts and the offline store implementation.
//!
//! # Responsibility
//! - Define the backend seam used by entity commits and refreshes.
//! - Keep SQLite details inside the store boundary.
//!
//! # Invariants
//! - Backends return semantic errors (`NotFound`, `Conflict`, `Rejected`)
//!   in addition to storage errors.

pub mod entity_repo;
