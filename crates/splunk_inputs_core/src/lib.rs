//! Client-side model of platform data inputs.
//! Kind classification from input paths and the host restriction
//! update/rename protocol live here.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod version;

pub use config::{ClientConfig, ConfigError};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::entity::{Args, Entity};
pub use model::input::{Input, RESTRICT_TO_HOST};
pub use model::input_kind::{known_kinds, InputKind};
pub use model::path::{AddressError, INPUTS_NAMESPACE};
pub use repo::entity_repo::{
    EntityBackend, EntitySnapshot, PersistError, PersistResult, SqliteEntityBackend,
};
pub use service::capability::{CapabilityError, PlatformCapability};
pub use service::context::ServiceContext;
pub use service::entity_service::EntityService;
pub use service::input_service::{InputError, InputResult, InputService};
pub use version::{PlatformVersion, VersionError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
