//! Session context for one connected platform instance.
//!
//! # Invariants
//! - One context per connected platform; the version never changes during
//!   the context's lifetime.

use crate::service::capability::{CapabilityError, PlatformCapability};
use crate::version::{compare, PlatformVersion, VersionError};
use log::warn;
use std::cmp::Ordering;

/// Explicit replacement for process-wide platform state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceContext {
    platform_version: PlatformVersion,
}

impl ServiceContext {
    pub fn new(platform_version: PlatformVersion) -> Self {
        Self { platform_version }
    }

    /// Builds a context from the version string the platform reports.
    pub fn from_version_str(version: &str) -> Result<Self, VersionError> {
        PlatformVersion::parse(version).map(Self::new)
    }

    pub fn platform_version(&self) -> &PlatformVersion {
        &self.platform_version
    }

    /// Orders the connected platform version against `reference`.
    pub fn version_compare(&self, reference: &PlatformVersion) -> Ordering {
        compare(&self.platform_version, reference)
    }

    /// Fails when the connected platform is older than the capability needs.
    pub fn assert_capability(&self, capability: PlatformCapability) -> Result<(), CapabilityError> {
        let minimum_version = capability.minimum_version();
        if self.version_compare(&minimum_version) == Ordering::Less {
            warn!(
                "event=capability_denied module=service capability={} platform_version={} minimum_version={}",
                capability.as_str(),
                self.platform_version,
                minimum_version
            );
            return Err(CapabilityError {
                capability,
                platform_version: self.platform_version.clone(),
                minimum_version,
            });
        }
        Ok(())
    }
}
