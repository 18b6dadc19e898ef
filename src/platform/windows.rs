//! Windows candidates.

use super::{Enumerator, DEFAULT_JAVA};
use crate::capability::{Registry, RegistryView};
use crate::{DiscoveryOptions, Install};
use async_trait::async_trait;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Default JRE locations for Java 6 through 8.
const WINDOWS_JAVAS: &[&str] = &[
    "C:/Program Files/Java/jre8/bin/javaw.exe",
    "C:/Program Files/Java/jre7/bin/javaw.exe",
    "C:/Program Files/Java/jre6/bin/javaw.exe",
    "C:/Program Files (x86)/Java/jre8/bin/javaw.exe",
    "C:/Program Files (x86)/Java/jre7/bin/javaw.exe",
    "C:/Program Files (x86)/Java/jre6/bin/javaw.exe",
    DEFAULT_JAVA,
];

/// Registry keys whose subkeys each describe one installed runtime.
pub(crate) const JAVA_REGISTRY_KEYS: &[&str] = &[
    r"HKLM\SOFTWARE\JavaSoft\Java Runtime Environment",
    r"HKLM\SOFTWARE\JavaSoft\Java Development Kit",
];

const JAVA_HOME_VALUE: &str = "JavaHome";

/// Windows enumerator: fixed paths plus every `JavaHome` registered under the
/// JavaSoft keys, in both registry views.
pub struct WindowsEnumerator {
    registry: Arc<dyn Registry>,
    options: DiscoveryOptions,
}

impl WindowsEnumerator {
    /// Create an enumerator reading through `registry`.
    pub fn new(registry: Arc<dyn Registry>, options: DiscoveryOptions) -> Self {
        Self { registry, options }
    }

    /// Candidates registered under one `(key, view)` pair.
    ///
    /// A key that cannot be opened yields nothing; a subkey without a readable
    /// `JavaHome` is skipped.
    async fn from_registry_key(&self, key: &str, view: RegistryView) -> Vec<Install> {
        let subkeys = match self.registry.subkeys(key, view).await {
            Ok(subkeys) => subkeys,
            Err(e) => {
                self.options
                    .debug(format_args!("skipping {key} ({view}): {e}"));
                return Vec::new();
            }
        };

        let homes = join_all(subkeys.iter().map(|subkey| async move {
            match self.registry.value(subkey, view, JAVA_HOME_VALUE).await {
                Ok(home) => home,
                Err(e) => {
                    tracing::debug!(subkey = %subkey, error = %e, "cannot read JavaHome");
                    None
                }
            }
        }))
        .await;

        homes
            .into_iter()
            .flatten()
            .filter(|home| !home.is_empty())
            .map(|home| Install::new(PathBuf::from(home).join("bin").join("javaw.exe")))
            .collect()
    }
}

#[async_trait]
impl Enumerator for WindowsEnumerator {
    async fn enumerate(&self) -> Vec<Install> {
        let lookups = JAVA_REGISTRY_KEYS
            .iter()
            .flat_map(|key| RegistryView::iter().map(move |view| (*key, view)))
            .map(|(key, view)| self.from_registry_key(key, view));
        let registered = join_all(lookups).await;

        WINDOWS_JAVAS
            .iter()
            .copied()
            .map(Install::new)
            .chain(registered.into_iter().flatten())
            .collect()
    }
}
