//! Discovery options configuration.
//!
//! This module provides the [`DiscoveryOptions`] struct for configuring
//! Java discovery, and the [`DebugSink`] observer for diagnostic lines.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Receiver for free-text diagnostic lines emitted during discovery.
///
/// Every line handed to the sink is also logged with `tracing::debug!`. The
/// sink is not part of the functional contract; it exists for hosts that want
/// to surface discovery diagnostics without installing a tracing subscriber.
///
/// # Example
///
/// ```rust
/// use java_discovery::DebugSink;
///
/// let sink = DebugSink::new(|line| eprintln!("[java] {line}"));
/// sink.emit("scanning /usr/bin");
/// ```
#[derive(Clone)]
pub struct DebugSink(Arc<dyn Fn(&str) + Send + Sync>);

impl DebugSink {
    /// Wrap a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Log `line` and forward it to the callback.
    pub fn emit(&self, line: impl fmt::Display) {
        let line = line.to_string();
        tracing::debug!(target: "java_discovery", "{line}");
        (self.0)(&line);
    }
}

impl fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DebugSink(..)")
    }
}

/// Configuration options for Java discovery.
///
/// # Example
///
/// ```rust
/// use java_discovery::DiscoveryOptions;
///
/// let opts = DiscoveryOptions::new("/opt/app/java/PrintJavaVersion.jar")
///     .with_debug_sink(|line| eprintln!("{line}"));
/// assert!(opts.debug_sink.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Absolute path to the helper jar that prints a runtime's version on
    /// line 1 and its bit width on line 2.
    ///
    /// [`new`](Self::new) resolves a relative path against the current
    /// directory. Set directly, it must already be absolute: candidates are
    /// spawned without a working directory of their own.
    pub helper_jar: PathBuf,

    /// Optional diagnostic observer.
    ///
    /// Default: `None`
    pub debug_sink: Option<DebugSink>,
}

impl DiscoveryOptions {
    /// Options with the given helper jar and no debug sink.
    ///
    /// A relative `helper_jar` is resolved against the current directory.
    pub fn new(helper_jar: impl Into<PathBuf>) -> Self {
        Self {
            helper_jar: absolute(helper_jar.into()),
            debug_sink: None,
        }
    }

    /// Attach a debug sink.
    pub fn with_debug_sink<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.debug_sink = Some(DebugSink::new(f));
        self
    }

    /// Report a diagnostic line through tracing and the sink, if any.
    pub(crate) fn debug(&self, line: impl fmt::Display) {
        match &self.debug_sink {
            Some(sink) => sink.emit(line),
            None => tracing::debug!(target: "java_discovery", "{line}"),
        }
    }
}

/// `path` joined onto the current directory when relative.
///
/// Left unchanged if the current directory cannot be read; the helper
/// existence check then reports it.
fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "cannot resolve relative helper path");
            path
        }
    }
}
