//! Candidate Java installations and their probe state.

use crate::detection::{parse_helper_output, run_helper};
use crate::JavaVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Processor architecture of a Java runtime.
///
/// Serializes and displays as `x86`, `x64` or `unknown`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Architecture {
    /// 32-bit runtime.
    X86,
    /// 64-bit runtime.
    X64,
    /// The helper reported something other than 32 or 64.
    Unknown,
}

impl Architecture {
    /// Map the helper's bit-width line to an architecture.
    ///
    /// ```rust
    /// use java_discovery::Architecture;
    ///
    /// assert_eq!(Architecture::from_bitness("64"), Architecture::X64);
    /// assert_eq!(Architecture::from_bitness("32"), Architecture::X86);
    /// assert_eq!(Architecture::from_bitness("128"), Architecture::Unknown);
    /// ```
    pub fn from_bitness(bits: &str) -> Self {
        match bits.trim() {
            "32" => Self::X86,
            "64" => Self::X64,
            _ => Self::Unknown,
        }
    }
}

/// Where an [`Install`] is in its probe lifecycle.
///
/// `Unprobed` moves to exactly one of `Resolved` or `Invalid`, and never moves
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    /// The helper has not been run yet.
    Unprobed,
    /// The helper ran and reported a version.
    Resolved {
        /// Reported architecture.
        arch: Architecture,
        /// Reported version.
        version: JavaVersion,
    },
    /// The helper failed, timed out, or could not be spawned.
    Invalid,
}

impl ProbeState {
    /// `true` for `Resolved`.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// `true` for `Invalid`.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

/// A candidate Java executable path.
///
/// Two installs are the same entity iff their paths are equal. Clones share
/// probe state, so a probe started through one clone is observed by all.
#[derive(Debug, Clone)]
pub struct Install {
    path: PathBuf,
    probe: Arc<OnceCell<ProbeState>>,
}

impl Install {
    /// Create an unprobed candidate.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            probe: Arc::new(OnceCell::new()),
        }
    }

    /// The candidate path, exactly as proposed by its enumerator.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current probe state, without probing.
    pub fn state(&self) -> ProbeState {
        self.probe.get().copied().unwrap_or(ProbeState::Unprobed)
    }

    /// Run the version helper against this candidate once.
    ///
    /// Spawns `<path> -jar <helper_jar>` with a 1 second timeout and caches the
    /// outcome for the lifetime of the install. Calls made after the outcome is
    /// known return it without spawning anything; calls made while a probe is
    /// in flight wait for that probe instead of starting another.
    ///
    /// Never returns `ProbeState::Unprobed`.
    pub async fn ensure_info(&self, helper_jar: &Path) -> ProbeState {
        *self
            .probe
            .get_or_init(|| async {
                let outcome = run_helper(&self.path, helper_jar)
                    .await
                    .and_then(|stdout| parse_helper_output(&stdout));
                match outcome {
                    Ok((version, arch)) => {
                        tracing::debug!(path = ?self.path, %version, %arch, "probed java install");
                        ProbeState::Resolved { arch, version }
                    }
                    Err(e @ crate::DiscoveryError::VersionParseFailed { .. }) => {
                        tracing::warn!(path = ?self.path, error = %e, "unexpected helper output");
                        ProbeState::Invalid
                    }
                    Err(e) => {
                        tracing::debug!(path = ?self.path, error = %e, "java install probe failed");
                        ProbeState::Invalid
                    }
                }
            })
            .await
    }

    /// The resolved record, if probing succeeded.
    pub fn resolved(&self) -> Option<JavaInstall> {
        match self.state() {
            ProbeState::Resolved { arch, version } => Some(JavaInstall {
                path: self.path.clone(),
                arch,
                version,
            }),
            _ => None,
        }
    }
}

impl PartialEq for Install {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Install {}

/// A validated Java runtime returned by discovery.
///
/// # Example
///
/// ```rust
/// use java_discovery::{Architecture, JavaInstall, JavaVersion};
/// use std::path::PathBuf;
///
/// let java = JavaInstall {
///     path: PathBuf::from("/usr/bin/java"),
///     arch: Architecture::X64,
///     version: JavaVersion::new(17, 0, 2, 0),
/// };
/// println!("{} ({}) at {:?}", java.version, java.arch, java.path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JavaInstall {
    /// Path to the executable, as it was discovered.
    pub path: PathBuf,
    /// Runtime architecture.
    pub arch: Architecture,
    /// Runtime version.
    pub version: JavaVersion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_install_is_unprobed() {
        let install = Install::new("/usr/bin/java");
        assert_eq!(install.state(), ProbeState::Unprobed);
        assert!(install.resolved().is_none());
    }

    #[test]
    fn test_identity_is_path() {
        assert_eq!(Install::new("/a/java"), Install::new("/a/java"));
        assert_ne!(Install::new("/a/java"), Install::new("/b/java"));
    }

    #[test]
    fn test_architecture_names() {
        assert_eq!(Architecture::X86.to_string(), "x86");
        assert_eq!(Architecture::X64.to_string(), "x64");
        let name: &'static str = Architecture::Unknown.into();
        assert_eq!(name, "unknown");
    }

    #[test]
    fn test_java_install_serialization() {
        let java = JavaInstall {
            path: PathBuf::from("/usr/bin/java"),
            arch: Architecture::X64,
            version: JavaVersion::new(1, 8, 0, 151),
        };
        let json = serde_json::to_value(&java).unwrap();
        assert_eq!(json["arch"], "x64");
        assert_eq!(json["version"]["update"], 151);

        let back: JavaInstall = serde_json::from_value(json).unwrap();
        assert_eq!(back, java);
    }

    #[tokio::test]
    async fn test_ensure_info_nonexistent_is_invalid() {
        let install = Install::new("/nonexistent/path/to/java");
        let state = install.ensure_info(Path::new("/nonexistent/helper.jar")).await;
        assert_eq!(state, ProbeState::Invalid);
        assert!(install.state().is_invalid());

        // Clones share the cached outcome.
        let clone = install.clone();
        assert!(clone.state().is_invalid());
    }

    #[cfg(unix)]
    mod fake_java {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_ensure_info_resolves() {
            let dir = tempfile::tempdir().unwrap();
            let java = write_script(dir.path(), "java", "printf '1.8.0_151\\n32\\n'");
            let install = Install::new(&java);

            let state = install.ensure_info(&dir.path().join("helper.jar")).await;
            assert_eq!(
                state,
                ProbeState::Resolved {
                    arch: Architecture::X86,
                    version: JavaVersion::new(1, 8, 0, 151),
                }
            );
            assert_eq!(
                install.resolved(),
                Some(JavaInstall {
                    path: java,
                    arch: Architecture::X86,
                    version: JavaVersion::new(1, 8, 0, 151),
                })
            );
        }

        #[tokio::test]
        async fn test_ensure_info_is_idempotent() {
            let dir = tempfile::tempdir().unwrap();
            let counter = dir.path().join("spawns");
            let java = write_script(
                dir.path(),
                "java",
                &format!("echo x >> '{}'\nprintf '9.0.1\\n64\\n'", counter.display()),
            );
            let install = Install::new(&java);
            let helper = dir.path().join("helper.jar");

            let first = install.ensure_info(&helper).await;
            let second = install.ensure_info(&helper).await;
            assert_eq!(first, second);
            assert!(first.is_resolved());

            let spawns = std::fs::read_to_string(&counter).unwrap();
            assert_eq!(spawns.lines().count(), 1);
        }

        #[tokio::test]
        async fn test_invalid_is_permanent() {
            let dir = tempfile::tempdir().unwrap();
            let counter = dir.path().join("spawns");
            let java = write_script(
                dir.path(),
                "java",
                &format!("echo x >> '{}'\nexit 1", counter.display()),
            );
            let install = Install::new(&java);
            let helper = dir.path().join("helper.jar");

            assert_eq!(install.ensure_info(&helper).await, ProbeState::Invalid);
            assert_eq!(install.ensure_info(&helper).await, ProbeState::Invalid);

            let spawns = std::fs::read_to_string(&counter).unwrap();
            assert_eq!(spawns.lines().count(), 1);
        }

        #[tokio::test]
        async fn test_concurrent_probes_share_one_spawn() {
            let dir = tempfile::tempdir().unwrap();
            let counter = dir.path().join("spawns");
            let java = write_script(
                dir.path(),
                "java",
                &format!(
                    "echo x >> '{}'\nsleep 0.2\nprintf '1.8.0_20\\n64\\n'",
                    counter.display()
                ),
            );
            let install = Install::new(&java);
            let helper = dir.path().join("helper.jar");

            let states = futures::future::join_all(
                (0..4).map(|_| install.ensure_info(&helper)),
            )
            .await;
            assert!(states.iter().all(|s| *s == states[0]));
            assert!(states[0].is_resolved());

            let spawns = std::fs::read_to_string(&counter).unwrap();
            assert_eq!(spawns.lines().count(), 1);
        }

        #[tokio::test]
        async fn test_slow_helper_times_out() {
            let dir = tempfile::tempdir().unwrap();
            let java = write_script(dir.path(), "java", "exec sleep 5");
            let install = Install::new(&java);

            let start = std::time::Instant::now();
            let state = install.ensure_info(&dir.path().join("helper.jar")).await;
            assert_eq!(state, ProbeState::Invalid);
            assert!(start.elapsed() < std::time::Duration::from_secs(4));
        }
    }
}
