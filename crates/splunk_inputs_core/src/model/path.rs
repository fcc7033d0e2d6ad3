//! Entity path and title helpers.
//!
//! # Responsibility
//! - Split `/`-delimited entity paths into the pieces the model needs.
//! - Derive host-restricted identifiers (`<host>:<port>` or bare `<port>`).
//!
//! # Invariants
//! - An entity title is always the final path segment.
//! - Titles carry at most one colon; the host part never contains one.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Namespace marker that every data input path contains.
///
/// Matches both `/services/data/inputs/...` and
/// `/servicesNS/<owner>/<app>/data/inputs/...` forms.
pub const INPUTS_NAMESPACE: &str = "/data/inputs/";

/// Address-level failures for input paths and titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Path does not live under [`INPUTS_NAMESPACE`].
    OutsideNamespace(String),
    /// Nothing follows the namespace marker.
    MissingKindSegment(String),
    /// `tcp` input path without the transport segment (`raw`/`cooked`).
    MissingTransportSegment(String),
    /// Title has more than one colon, so host and port cannot be split.
    AmbiguousTitle(String),
    /// Title has no port after its last colon.
    MissingPort(String),
}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutsideNamespace(path) => {
                write!(f, "path is not under `{INPUTS_NAMESPACE}`: {path}")
            }
            Self::MissingKindSegment(path) => write!(f, "path has no input kind segment: {path}"),
            Self::MissingTransportSegment(path) => {
                write!(f, "tcp input path has no transport segment: {path}")
            }
            Self::AmbiguousTitle(title) => {
                write!(f, "title has more than one host/port separator: {title}")
            }
            Self::MissingPort(title) => write!(f, "title has no port: {title}"),
        }
    }
}

impl Error for AddressError {}

/// Returns the final `/`-delimited segment of `path`.
///
/// A path without `/` is its own last segment.
pub fn last_segment(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Returns `path` with its final segment replaced by `segment`.
pub fn replace_last_segment(path: &str, segment: &str) -> String {
    match path.rfind('/') {
        Some(index) => format!("{}{segment}", &path[..=index]),
        None => segment.to_string(),
    }
}

/// Returns the part of `path` after the first [`INPUTS_NAMESPACE`] marker.
pub fn namespace_remainder(path: &str) -> Result<&str, AddressError> {
    path.find(INPUTS_NAMESPACE)
        .map(|index| &path[index + INPUTS_NAMESPACE.len()..])
        .ok_or_else(|| AddressError::OutsideNamespace(path.to_string()))
}

/// Extracts the port from a `<host>:<port>` or bare `<port>` title.
///
/// # Errors
/// - `AmbiguousTitle` when the title contains more than one colon.
/// - `MissingPort` when nothing follows the last colon.
pub fn port_from_title(title: &str) -> Result<&str, AddressError> {
    if title.matches(':').count() > 1 {
        return Err(AddressError::AmbiguousTitle(title.to_string()));
    }
    let port = match title.rfind(':') {
        Some(index) => &title[index + 1..],
        None => title,
    };
    if port.is_empty() {
        return Err(AddressError::MissingPort(title.to_string()));
    }
    Ok(port)
}

/// Builds the identifier an input receives after its host restriction changes.
///
/// An empty host removes the restriction and leaves the bare port.
pub fn renamed_identifier(port: &str, new_host: &str) -> String {
    if new_host.is_empty() {
        port.to_string()
    } else {
        format!("{new_host}:{port}")
    }
}
