//! Structured Java version.

use crate::detection::parse_java_version;
use crate::DiscoveryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Java runtime version as reported by the version helper.
///
/// Legacy runtimes report `1.8.0_151` (update 151); modern ones report
/// `11.0.22`, in which case `update` is 0. Versions order by
/// `(major, minor, patch, update)`.
///
/// # Example
///
/// ```rust
/// use java_discovery::JavaVersion;
///
/// let version: JavaVersion = "1.8.0_151".parse().unwrap();
/// assert_eq!(version, JavaVersion::new(1, 8, 0, 151));
/// assert_eq!(version.to_string(), "1.8.0_151");
/// assert!(version < "9.0.1".parse().unwrap());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct JavaVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
    /// Update number, 0 when absent.
    pub update: u32,
}

impl JavaVersion {
    /// Build a version from its four components.
    pub const fn new(major: u32, minor: u32, patch: u32, update: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            update,
        }
    }
}

impl FromStr for JavaVersion {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_java_version(s)
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.update != 0 {
            write!(f, "_{}", self.update)?;
        }
        Ok(())
    }
}
