//! Java discovery pipeline.

use crate::capability::{FileSystem, LocalFileSystem, RegExe, Registry};
use crate::platform::{enumerator_for, Enumerator, Platform};
use crate::{DiscoveryError, DiscoveryOptions, Install, JavaInstall, SingleFlight};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;

/// Run one full discovery pass.
///
/// # Pipeline
///
/// 1. Check that the helper jar exists (the only failure surfaced here)
/// 2. Collect candidates from `enumerator`
/// 3. Keep candidates the current user can execute
/// 4. Deduplicate by path, keeping the first occurrence
/// 5. Probe every survivor concurrently with the helper
/// 6. Drop candidates whose probe failed
///
/// A candidate that cannot be executed or probed is left out of the result;
/// it never fails the pass. An empty result means no Java was found.
///
/// The order of the returned list is unspecified.
pub async fn discover(
    enumerator: &dyn Enumerator,
    fs: &dyn FileSystem,
    options: &DiscoveryOptions,
) -> Result<Vec<JavaInstall>, DiscoveryError> {
    // Step 1: The helper is required for every probe
    if !fs.exists(&options.helper_jar).await {
        return Err(DiscoveryError::HelperNotFound {
            path: options.helper_jar.clone(),
        });
    }

    // Step 2: Raw candidates
    let candidates = enumerator.enumerate().await;
    tracing::info!(count = candidates.len(), "enumerated java candidates");

    // Step 3: Executability filter
    let executable = join_all(candidates.into_iter().map(|install| async move {
        if fs.can_execute(install.path()).await {
            Some(install)
        } else {
            tracing::trace!(path = ?install.path(), "not executable");
            None
        }
    }))
    .await;

    // Step 4: Deduplicate by path
    let mut seen = HashSet::new();
    let unique: Vec<Install> = executable
        .into_iter()
        .flatten()
        .filter(|install| seen.insert(install.path().to_path_buf()))
        .collect();

    // Step 5: Probe concurrently
    let states = join_all(
        unique
            .iter()
            .map(|install| install.ensure_info(&options.helper_jar)),
    )
    .await;

    // Step 6: Validity filter
    let javas: Vec<JavaInstall> = unique
        .iter()
        .zip(states)
        .filter_map(|(install, state)| {
            if state.is_invalid() {
                options.debug(format_args!(
                    "{} is not a usable java",
                    install.path().display()
                ));
            }
            install.resolved()
        })
        .collect();

    tracing::info!(count = javas.len(), "discovered java installs");
    Ok(javas)
}

/// Process-lifetime entry point for Java discovery.
///
/// The first call to [`java_installs`](Self::java_installs) runs the
/// pipeline; concurrent calls share that run, and once it succeeds every later
/// call returns the same list without touching the system again. If the run
/// fails, the next call starts over.
///
/// # Example
///
/// ```rust,no_run
/// use java_discovery::{DiscoveryOptions, JavaDiscovery};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let discovery = JavaDiscovery::new(DiscoveryOptions::new(
///         "/opt/launcher/java/PrintJavaVersion.jar",
///     ));
///
///     match discovery.java_installs().await {
///         Ok(javas) if javas.is_empty() => println!("No Java found"),
///         Ok(javas) => {
///             for java in javas {
///                 println!("{} {} at {:?}", java.version, java.arch, java.path);
///             }
///         }
///         Err(e) => eprintln!("Discovery failed: {}", e.description()),
///     }
/// }
/// ```
pub struct JavaDiscovery {
    cache: SingleFlight<Vec<JavaInstall>, DiscoveryError>,
}

impl JavaDiscovery {
    /// Discovery for the current platform against the real system.
    pub fn new(options: DiscoveryOptions) -> Self {
        Self::for_platform(
            Platform::current(),
            Arc::new(LocalFileSystem),
            Arc::new(RegExe),
            options,
        )
    }

    /// Discovery for `platform` through the given capabilities.
    pub fn for_platform(
        platform: Platform,
        fs: Arc<dyn FileSystem>,
        registry: Arc<dyn Registry>,
        options: DiscoveryOptions,
    ) -> Self {
        let enumerator = enumerator_for(platform, fs.clone(), registry, &options);
        Self::with_enumerator(enumerator, fs, options)
    }

    /// Discovery over a custom candidate source.
    pub fn with_enumerator(
        enumerator: Arc<dyn Enumerator>,
        fs: Arc<dyn FileSystem>,
        options: DiscoveryOptions,
    ) -> Self {
        let options = Arc::new(options);
        let cache = SingleFlight::new(move || {
            let enumerator = enumerator.clone();
            let fs = fs.clone();
            let options = options.clone();
            async move { discover(enumerator.as_ref(), fs.as_ref(), &options).await }
        });
        Self { cache }
    }

    /// Every usable Java installation on this machine.
    pub async fn java_installs(&self) -> Result<Vec<JavaInstall>, DiscoveryError> {
        self.cache.get().await
    }

    /// Whether a discovery result is already cached.
    pub fn is_resolved(&self) -> bool {
        self.cache.is_resolved()
    }
}
