//! Platform version parsing and comparison.
//!
//! # Responsibility
//! - Parse dotted platform version strings (`6.0`, `5.0.2`, `8.2.1-beta`).
//! - Compare versions component-wise for capability gates.
//!
//! # Invariants
//! - Missing trailing components compare as zero (`5` == `5.0.0`).
//! - Only the leading numeric dotted prefix is significant.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

static VERSION_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)*)").expect("valid version regex"));

/// Version parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    Invalid(String),
}

impl Display for VersionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(value) => write!(f, "invalid platform version: {value}"),
        }
    }
}

impl Error for VersionError {}

/// Parsed platform version.
#[derive(Debug, Clone)]
pub struct PlatformVersion {
    components: Vec<u32>,
}

impl PlatformVersion {
    /// Builds a version from numeric components (`&[5, 0]` is `5.0`).
    pub fn from_components(components: &[u32]) -> Self {
        Self {
            components: components.to_vec(),
        }
    }

    /// Parses the leading dotted numeric prefix of `value`.
    pub fn parse(value: &str) -> Result<Self, VersionError> {
        let captures = VERSION_PREFIX_RE
            .captures(value)
            .ok_or_else(|| VersionError::Invalid(value.to_string()))?;
        let components = captures[1]
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VersionError::Invalid(value.to_string()))?;
        Ok(Self { components })
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }
}

/// Compares `current` against `reference`, padding with zeros.
pub fn compare(current: &PlatformVersion, reference: &PlatformVersion) -> Ordering {
    let width = current.components.len().max(reference.components.len());
    (0..width)
        .map(|index| {
            let left = current.components.get(index).copied().unwrap_or(0);
            let right = reference.components.get(index).copied().unwrap_or(0);
            left.cmp(&right)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl PartialEq for PlatformVersion {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for PlatformVersion {}

impl PartialOrd for PlatformVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlatformVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Display for PlatformVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = self
            .components
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&text)
    }
}

impl std::str::FromStr for PlatformVersion {
    type Err = VersionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}
