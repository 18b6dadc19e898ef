//! macOS candidates.

use super::{subdirectories, Enumerator, DEFAULT_JAVA};
use crate::capability::FileSystem;
use crate::{DiscoveryOptions, Install};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Well-known macOS Java locations.
const MAC_JAVAS: &[&str] = &[
    DEFAULT_JAVA,
    "/Applications/Xcode.app/Contents/Applications/Application Loader.app/Contents/MacOS/itms/java/bin/java",
    "/Library/Internet Plug-Ins/JavaAppletPlugin.plugin/Contents/Home/bin/java",
    "/System/Library/Frameworks/JavaVM.framework/Versions/Current/Commands/java",
];

/// Installed JDK bundles, and the executables inside each bundle.
const USER_JVM_ROOT: &str = "/Library/Java/JavaVirtualMachines/";
const USER_JVM_BINARIES: &[&str] = &["Contents/Home/bin/java", "Contents/Home/jre/bin/java"];

/// Apple-supplied JDK bundles, and the executables inside each bundle.
const SYSTEM_JVM_ROOT: &str = "/System/Library/Java/JavaVirtualMachines/";
const SYSTEM_JVM_BINARIES: &[&str] = &["Contents/Home/bin/java", "Contents/Commands/java"];

/// macOS enumerator: fixed paths plus a scan of the two JVM bundle roots.
pub struct MacEnumerator {
    fs: Arc<dyn FileSystem>,
    options: DiscoveryOptions,
}

impl MacEnumerator {
    /// Create an enumerator scanning through `fs`.
    pub fn new(fs: Arc<dyn FileSystem>, options: DiscoveryOptions) -> Self {
        Self { fs, options }
    }

    async fn scan(&self, root: &str, binaries: &[&str]) -> Vec<Install> {
        match subdirectories(self.fs.as_ref(), Path::new(root)).await {
            Ok(bundles) => bundles
                .iter()
                .flat_map(|bundle| binaries.iter().map(|bin| Install::new(bundle.join(bin))))
                .collect(),
            Err(e) => {
                self.options
                    .debug(format_args!("cannot scan {root}: {e}"));
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Enumerator for MacEnumerator {
    async fn enumerate(&self) -> Vec<Install> {
        let (user, system) = futures::join!(
            self.scan(USER_JVM_ROOT, USER_JVM_BINARIES),
            self.scan(SYSTEM_JVM_ROOT, SYSTEM_JVM_BINARIES),
        );

        MAC_JAVAS
            .iter()
            .copied()
            .map(Install::new)
            .chain(user)
            .chain(system)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fakes::FakeFs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    fn paths(installs: &[Install]) -> Vec<PathBuf> {
        installs.iter().map(|i| i.path().to_path_buf()).collect()
    }

    #[tokio::test]
    async fn test_static_only_when_roots_missing() {
        let enumerator = MacEnumerator::new(
            Arc::new(FakeFs::default()),
            DiscoveryOptions::new("/tmp/helper.jar"),
        );
        let found = paths(&enumerator.enumerate().await);
        assert_eq!(found.len(), 4);
        assert_eq!(found[0], PathBuf::from("java"));
    }

    #[tokio::test]
    async fn test_scans_both_roots() {
        let fs = FakeFs::default()
            .with_dir(USER_JVM_ROOT, &["jdk-17.jdk"])
            .with_file(USER_JVM_ROOT, ".localized")
            .with_dir(SYSTEM_JVM_ROOT, &["1.6.0.jdk"]);
        let enumerator =
            MacEnumerator::new(Arc::new(fs), DiscoveryOptions::new("/tmp/helper.jar"));

        let found = paths(&enumerator.enumerate().await);
        assert_eq!(found.len(), 8);
        for expected in [
            "/Library/Java/JavaVirtualMachines/jdk-17.jdk/Contents/Home/bin/java",
            "/Library/Java/JavaVirtualMachines/jdk-17.jdk/Contents/Home/jre/bin/java",
            "/System/Library/Java/JavaVirtualMachines/1.6.0.jdk/Contents/Home/bin/java",
            "/System/Library/Java/JavaVirtualMachines/1.6.0.jdk/Contents/Commands/java",
        ] {
            assert!(found.contains(&PathBuf::from(expected)), "missing {expected}");
        }
    }

    #[tokio::test]
    async fn test_unreadable_root_is_reported_not_fatal() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let lines_clone = lines.clone();
        let fs = FakeFs::default()
            .with_dir(USER_JVM_ROOT, &["jdk-11.jdk"])
            .with_dir(SYSTEM_JVM_ROOT, &[])
            .with_unreadable(SYSTEM_JVM_ROOT);
        let options = DiscoveryOptions::new("/tmp/helper.jar")
            .with_debug_sink(move |line| lines_clone.lock().unwrap().push(line.to_string()));
        let enumerator = MacEnumerator::new(Arc::new(fs), options);

        let found = enumerator.enumerate().await;
        assert_eq!(found.len(), 6);

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(SYSTEM_JVM_ROOT));
    }
}
