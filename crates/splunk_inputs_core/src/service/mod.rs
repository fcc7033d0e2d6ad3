//! Entity and input use-case services.
//!
//! # Responsibility
//! - Orchestrate backend commits into use-case level update APIs.
//! - Hold the session context (platform version) explicitly.

pub mod capability;
pub mod context;
pub mod entity_service;
pub mod input_service;
