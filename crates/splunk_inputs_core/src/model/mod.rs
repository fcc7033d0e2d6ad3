//! Client-side model of remote data inputs.
//!
//! # Responsibility
//! - Define the local proxy types for remote entities and inputs.
//! - Derive input kinds and renamed identifiers from paths, without I/O.
//!
//! # Invariants
//! - An entity's title is always its final path segment.
//! - Kinds are computed from the current path, never stored.

pub mod entity;
pub mod input;
pub mod input_kind;
pub mod path;
