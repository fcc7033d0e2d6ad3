//! Version-gated platform capabilities.

use crate::version::PlatformVersion;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Operation that needs a minimum platform version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlatformCapability {
    RestrictToHost,
}

impl PlatformCapability {
    /// Stable id used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RestrictToHost => "restrict_to_host",
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::RestrictToHost => "Update the host restriction of a network input.",
        }
    }

    /// First platform version that supports this capability.
    pub fn minimum_version(self) -> PlatformVersion {
        match self {
            Self::RestrictToHost => PlatformVersion::from_components(&[5, 0]),
        }
    }
}

/// Capability rejected before any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityError {
    pub capability: PlatformCapability,
    pub platform_version: PlatformVersion,
    pub minimum_version: PlatformVersion,
}

impl Display for CapabilityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "capability `{}` ({}) needs platform {} or newer; connected platform is {}",
            self.capability.as_str(),
            self.capability.description(),
            self.minimum_version,
            self.platform_version
        )
    }
}

impl Error for CapabilityError {}

#[cfg(test)]
mod tests {
    use super::{CapabilityError, PlatformCapability};
    use crate::version::PlatformVersion;

    #[test]
    fn error_message_names_capability_and_versions() {
        let err = CapabilityError {
            capability: PlatformCapability::RestrictToHost,
            platform_version: PlatformVersion::from_components(&[4, 5]),
            minimum_version: PlatformCapability::RestrictToHost.minimum_version(),
        };
        let message = err.to_string();
        assert!(message.contains("restrict_to_host"));
        assert!(message.contains("host restriction of a network input"));
        assert!(message.contains("5.0"));
        assert!(message.contains("4.5"));
    }

    #[test]
    fn restrict_to_host_needs_five_zero() {
        assert_eq!(
            PlatformCapability::RestrictToHost.minimum_version(),
            PlatformVersion::parse("5.0").expect("version")
        );
        assert_eq!(PlatformCapability::RestrictToHost.as_str(), "restrict_to_host");
        assert!(PlatformCapability::RestrictToHost
            .description()
            .contains("host restriction"));
    }
}
