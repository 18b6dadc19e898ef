//! # java-discovery
//!
//! Discovery of installed Java runtimes on Windows, macOS and Linux.
//!
//! Candidate executables are collected from well-known paths, JVM bundle
//! directories (macOS) and the JavaSoft registry keys (Windows). Each
//! candidate that can be executed is run once with a small helper jar that
//! prints the runtime's version and bit width; candidates that fail are
//! dropped.
//!
//! ## Features
//!
//! - [`JavaDiscovery`] runs discovery once per process and caches the result
//! - [`discover`] runs a single uncached pass
//! - [`Install`] probes one candidate path, at most once
//! - [`FileSystem`] and [`Registry`] capabilities, replaceable for testing
//!
//! ## Example
//!
//! ```rust,no_run
//! use java_discovery::{DiscoveryOptions, JavaDiscovery};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let discovery = JavaDiscovery::new(
//!         DiscoveryOptions::new("/opt/launcher/java/PrintJavaVersion.jar")
//!             .with_debug_sink(|line| eprintln!("[java] {line}")),
//!     );
//!
//!     for java in discovery.java_installs().await.unwrap_or_default() {
//!         println!("{} ({}): {:?}", java.version, java.arch, java.path);
//!     }
//! }
//! ```

mod capability;
mod detect;
mod detection;
mod error;
mod java_install;
mod java_version;
mod options;
mod platform;
mod single_flight;

pub use capability::{FileSystem, LocalFileSystem, RegExe, Registry, RegistryView};
pub use detect::{discover, JavaDiscovery};
pub use error::DiscoveryError;
pub use java_install::{Architecture, Install, JavaInstall, ProbeState};
pub use java_version::JavaVersion;
pub use options::{DebugSink, DiscoveryOptions};
pub use platform::{
    enumerator_for, Enumerator, FallbackEnumerator, LinuxEnumerator, MacEnumerator, Platform,
    WindowsEnumerator,
};
pub use single_flight::SingleFlight;
