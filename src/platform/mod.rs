//! Platform-specific candidate enumeration.
//!
//! Each supported OS has an [`Enumerator`] producing the raw, unfiltered list
//! of candidate Java executables. [`Platform::current`] picks one at startup;
//! nothing downstream of [`enumerator_for`] branches on the OS.

mod linux;
mod macos;
mod windows;

pub use linux::LinuxEnumerator;
pub use macos::MacEnumerator;
pub use windows::WindowsEnumerator;

use crate::capability::{FileSystem, Registry};
use crate::{DiscoveryOptions, Install};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The bare command name, resolved through the process search path.
pub(crate) const DEFAULT_JAVA: &str = "java";

/// Source of candidate Java executables.
///
/// Enumeration never fails: a source that cannot be read contributes no
/// candidates. The returned list may contain duplicates and paths that do not
/// exist.
#[async_trait]
pub trait Enumerator: Send + Sync {
    /// Propose every candidate this source knows about.
    async fn enumerate(&self) -> Vec<Install>;
}

/// Operating systems with a dedicated enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    #[strum(serialize = "macOS")]
    MacOs,
    /// Linux.
    Linux,
    /// Anything else; only the bare `java` command is tried.
    Other,
}

impl Platform {
    /// The platform this crate was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }
}

/// Enumerator for platforms without a dedicated one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackEnumerator;

#[async_trait]
impl Enumerator for FallbackEnumerator {
    async fn enumerate(&self) -> Vec<Install> {
        vec![Install::new(DEFAULT_JAVA)]
    }
}

/// Build the enumerator for `platform`.
///
/// The registry is only consulted on Windows.
pub fn enumerator_for(
    platform: Platform,
    fs: Arc<dyn FileSystem>,
    registry: Arc<dyn Registry>,
    options: &DiscoveryOptions,
) -> Arc<dyn Enumerator> {
    match platform {
        Platform::Windows => Arc::new(WindowsEnumerator::new(registry, options.clone())),
        Platform::MacOs => Arc::new(MacEnumerator::new(fs, options.clone())),
        Platform::Linux => Arc::new(LinuxEnumerator),
        Platform::Other => Arc::new(FallbackEnumerator),
    }
}

/// Immediate subdirectories of `root`.
///
/// Entries that cannot be stat'ed are skipped; a root that cannot be listed is
/// an error.
pub(crate) async fn subdirectories(
    fs: &dyn FileSystem,
    root: &Path,
) -> std::io::Result<Vec<PathBuf>> {
    let names = fs.list_dir(root).await?;
    let checks = names.into_iter().map(|name| async move {
        let path = root.join(name);
        match fs.is_dir(&path).await {
            Ok(true) => Some(path),
            Ok(false) => None,
            Err(e) => {
                tracing::debug!(?path, error = %e, "skipping unreadable entry");
                None
            }
        }
    });
    Ok(futures::future::join_all(checks)
        .await
        .into_iter()
        .flatten()
        .collect())
}
