//! Error types for Java runtime discovery.

use std::path::PathBuf;
use thiserror::Error;

/// Typed error variants for discovery failures.
///
/// Only [`DiscoveryError::HelperNotFound`] ever reaches callers of
/// [`JavaDiscovery::java_installs`](crate::JavaDiscovery::java_installs).
/// Every other variant describes why a single candidate or enumeration source
/// was dropped, and is only reported through logging and the debug sink.
///
/// The enum is `Clone` so that one outcome can be handed to every caller
/// waiting on the same discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The version-printing helper jar does not exist.
    #[error("helper jar not found at {path:?}")]
    HelperNotFound {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The helper did not finish within the probe timeout.
    #[error("probe timed out")]
    Timeout,

    /// Permission denied executing the candidate.
    #[error("permission denied")]
    PermissionDenied,

    /// I/O error spawning or talking to a process.
    #[error("i/o error: {message}")]
    Io {
        /// Underlying error text.
        message: String,
    },

    /// The helper exited unsuccessfully.
    #[error("probe exited with code {code:?}")]
    ProbeFailed {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// The helper output did not contain a `major.minor.patch[_update]` version.
    #[error("failed to parse java version from {output:?}")]
    VersionParseFailed {
        /// The text that was parsed.
        output: String,
    },

    /// A registry key could not be opened or enumerated.
    #[error("registry key {key} unavailable: {message}")]
    Registry {
        /// The key that was queried.
        key: String,
        /// Why it failed.
        message: String,
    },
}

impl DiscoveryError {
    /// Human-readable description of the error kind.
    ///
    /// ```rust
    /// use java_discovery::DiscoveryError;
    ///
    /// assert_eq!(DiscoveryError::Timeout.description(), "Probe timed out");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            Self::HelperNotFound { .. } => "Helper jar not found",
            Self::Timeout => "Probe timed out",
            Self::PermissionDenied => "Permission denied",
            Self::Io { .. } => "I/O error during discovery",
            Self::ProbeFailed { .. } => "Probe exited unsuccessfully",
            Self::VersionParseFailed { .. } => "Failed to parse version",
            Self::Registry { .. } => "Registry key unavailable",
        }
    }
}

impl From<std::io::Error> for DiscoveryError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied
        } else {
            Self::Io {
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(DiscoveryError::Timeout.description(), "Probe timed out");
        assert_eq!(
            DiscoveryError::ProbeFailed { code: Some(1) }.description(),
            "Probe exited unsuccessfully"
        );
        assert_eq!(
            DiscoveryError::HelperNotFound {
                path: PathBuf::from("/nowhere/helper.jar")
            }
            .description(),
            "Helper jar not found"
        );
    }

    #[test]
    fn test_display_includes_context() {
        let error = DiscoveryError::Registry {
            key: r"HKLM\SOFTWARE\JavaSoft".to_string(),
            message: "access denied".to_string(),
        };
        let text = error.to_string();
        assert!(text.contains("JavaSoft"));
        assert!(text.contains("access denied"));
    }

    #[test]
    fn test_from_io_error() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(DiscoveryError::from(denied), DiscoveryError::PermissionDenied);

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            DiscoveryError::from(missing),
            DiscoveryError::Io { .. }
        ));
    }
}
