//! Input kind taxonomy derived from entity paths.
//!
//! # Responsibility
//! - Map an input path to its kind without any I/O.
//! - Keep unknown kinds representable so newer servers never break clients.
//!
//! # Invariants
//! - Classification is recomputed from the current path on every call.
//! - Every well-formed input path yields a kind; unknown keys become
//!   `InputKind::Unrecognized`.
//! - `tcp` inputs use a two-level key (`tcp/raw`, `tcp/cooked`).

use crate::model::path::{namespace_remainder, AddressError, INPUTS_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const TCP_SEGMENT: &str = "tcp";

/// Classification of a data input.
///
/// Serialized as its relative path key (for example `tcp/raw`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum InputKind {
    /// File or directory monitor (`monitor`).
    Monitor,
    /// Scripted input (`script`).
    Script,
    /// Raw TCP listener (`tcp/raw`).
    TcpRaw,
    /// Forwarder-to-indexer TCP listener (`tcp/cooked`).
    TcpCooked,
    /// UDP listener (`udp`).
    Udp,
    /// Windows Active Directory monitor (`ad`).
    WindowsActiveDirectory,
    /// Windows event log collection (`win-event-log-collections`).
    WindowsEventLog,
    /// Windows performance monitor (`win-perfmon`).
    WindowsPerfmon,
    /// Windows registry monitor (`registry`).
    WindowsRegistry,
    /// Windows WMI collection (`win-wmi-collections`).
    WindowsWmi,
    /// Kind the client does not know about, carrying the raw key.
    Unrecognized(String),
}

const KNOWN_KINDS: &[InputKind] = &[
    InputKind::Monitor,
    InputKind::Script,
    InputKind::TcpRaw,
    InputKind::TcpCooked,
    InputKind::Udp,
    InputKind::WindowsActiveDirectory,
    InputKind::WindowsEventLog,
    InputKind::WindowsPerfmon,
    InputKind::WindowsRegistry,
    InputKind::WindowsWmi,
];

impl InputKind {
    /// Resolves a kind key such as `monitor` or `tcp/raw`. Never fails.
    pub fn from_key(key: &str) -> Self {
        KNOWN_KINDS
            .iter()
            .find(|kind| kind.relative_path() == key)
            .cloned()
            .unwrap_or_else(|| Self::Unrecognized(key.to_string()))
    }

    /// Classifies an input by its path.
    ///
    /// # Errors
    /// - `OutsideNamespace` when the path has no `/data/inputs/` marker.
    /// - `MissingKindSegment` when nothing follows the marker.
    /// - `MissingTransportSegment` for `tcp` paths without `raw`/`cooked`.
    pub fn classify(path: &str) -> Result<Self, AddressError> {
        let mut segments = namespace_remainder(path)?.split('/');
        let first = segments.next().unwrap_or_default();
        if first.is_empty() {
            return Err(AddressError::MissingKindSegment(path.to_string()));
        }
        if first != TCP_SEGMENT {
            return Ok(Self::from_key(first));
        }

        match segments.next() {
            Some(transport) if !transport.is_empty() => {
                Ok(Self::from_key(&format!("{TCP_SEGMENT}/{transport}")))
            }
            _ => Err(AddressError::MissingTransportSegment(path.to_string())),
        }
    }

    /// Path of this kind's collection relative to the inputs namespace.
    pub fn relative_path(&self) -> &str {
        match self {
            Self::Monitor => "monitor",
            Self::Script => "script",
            Self::TcpRaw => "tcp/raw",
            Self::TcpCooked => "tcp/cooked",
            Self::Udp => "udp",
            Self::WindowsActiveDirectory => "ad",
            Self::WindowsEventLog => "win-event-log-collections",
            Self::WindowsPerfmon => "win-perfmon",
            Self::WindowsRegistry => "registry",
            Self::WindowsWmi => "win-wmi-collections",
            Self::Unrecognized(key) => key.as_str(),
        }
    }

    /// Collection endpoint for this kind under `prefix` (e.g. `/services`).
    pub fn endpoint(&self, prefix: &str) -> String {
        format!(
            "{}{INPUTS_NAMESPACE}{}",
            prefix.trim_end_matches('/'),
            self.relative_path()
        )
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// Returns every kind this client recognizes.
pub fn known_kinds() -> &'static [InputKind] {
    KNOWN_KINDS
}

impl Display for InputKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.relative_path())
    }
}

impl From<String> for InputKind {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<InputKind> for String {
    fn from(value: InputKind) -> Self {
        match value {
            InputKind::Unrecognized(key) => key,
            known => known.relative_path().to_string(),
        }
    }
}
