//! Data input update protocol.
//!
//! # Responsibility
//! - Gate host restriction changes on the connected platform version.
//! - Delegate persistence to the generic entity commit.
//! - Rewrite the local path/title after the server-side rename.
//!
//! # Invariants
//! - The capability gate and title parsing run before any I/O.
//! - Local path/title change only after a confirmed commit.
//! - After a successful update, `title == last_segment(path)`.

use crate::model::entity::Args;
use crate::model::input::Input;
use crate::model::input_kind::InputKind;
use crate::model::path::{port_from_title, renamed_identifier, AddressError};
use crate::repo::entity_repo::{EntityBackend, PersistError, PersistResult};
use crate::service::capability::{CapabilityError, PlatformCapability};
use crate::service::context::ServiceContext;
use crate::service::entity_service::EntityService;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InputResult<T> = Result<T, InputError>;

/// Failures of the input update protocol.
#[derive(Debug)]
pub enum InputError {
    /// Platform too old for a requested change; raised before any I/O.
    Capability(CapabilityError),
    /// Backend commit failed; nothing was renamed locally.
    Persist(PersistError),
    MalformedAddress(AddressError),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capability(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "{err}"),
            Self::MalformedAddress(err) => write!(f, "malformed input address: {err}"),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Capability(err) => Some(err),
            Self::Persist(err) => Some(err),
            Self::MalformedAddress(err) => Some(err),
        }
    }
}

impl From<CapabilityError> for InputError {
    fn from(value: CapabilityError) -> Self {
        Self::Capability(value)
    }
}

impl From<PersistError> for InputError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

impl From<AddressError> for InputError {
    fn from(value: AddressError) -> Self {
        Self::MalformedAddress(value)
    }
}

/// Rename captured before a commit that changes the host restriction.
struct PendingRename {
    port: String,
    host: String,
}

/// Use-case service for data inputs on one connected platform.
pub struct InputService<B: EntityBackend> {
    context: ServiceContext,
    entities: EntityService<B>,
}

impl<B: EntityBackend> InputService<B> {
    pub fn new(context: ServiceContext, backend: B) -> Self {
        Self {
            context,
            entities: EntityService::new(backend),
        }
    }

    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    /// Classifies `input` from its current path.
    pub fn kind(&self, input: &Input) -> InputResult<InputKind> {
        Ok(input.kind()?)
    }

    /// Commits `changes` plus staged attributes for `input`.
    ///
    /// When the host restriction changes, the server renames the input to
    /// `<host>:<port>` (or bare `<port>` for an empty host); the local path
    /// and title follow once the commit is confirmed.
    ///
    /// # Errors
    /// - `Capability` when the host restriction is targeted on a platform
    ///   older than 5.0. No I/O happens.
    /// - `MalformedAddress` when the current title cannot be split into
    ///   host and port. No I/O happens.
    /// - `Persist` for any backend failure, unchanged.
    pub fn update(&self, input: &mut Input, changes: &Args) -> InputResult<()> {
        let rename = self.prepare_rename(input, changes)?;

        self.entities.commit(input.entity_mut(), changes)?;

        if let Some(rename) = rename {
            let identifier = renamed_identifier(&rename.port, &rename.host);
            input.entity_mut().rename(&identifier);
            info!(
                "event=input_rename module=service status=ok host_cleared={}",
                rename.host.is_empty()
            );
        }
        Ok(())
    }

    /// Commits only the staged attributes of `input`.
    pub fn update_staged(&self, input: &mut Input) -> InputResult<()> {
        self.update(input, &Args::new())
    }

    /// Reloads the attribute snapshot of `input` from the backend.
    pub fn refresh(&self, input: &mut Input) -> PersistResult<()> {
        self.entities.refresh(input.entity_mut())
    }

    fn prepare_rename(&self, input: &Input, changes: &Args) -> InputResult<Option<PendingRename>> {
        let Some(host) = input.intended_host(changes) else {
            return Ok(None);
        };

        self.context
            .assert_capability(PlatformCapability::RestrictToHost)?;

        let port = port_from_title(input.title())?.to_string();
        debug!("event=input_rename module=service status=prepared");
        Ok(Some(PendingRename { port, host }))
    }
}
