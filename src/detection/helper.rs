//! Out-of-process probing of a Java executable with the version helper.

use crate::{Architecture, DiscoveryError, JavaVersion};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use super::parse_java_version;

/// Hard wall-clock bound on a single helper invocation.
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Run `<java> -jar <helper_jar>` and capture its standard output.
///
/// The child is killed if it outlives [`PROBE_TIMEOUT`].
///
/// # Returns
///
/// `Ok(String)` with the helper's stdout, or a `DiscoveryError` on failure:
/// - `Timeout` if the helper takes longer than the probe timeout
/// - `PermissionDenied` if the candidate cannot be executed
/// - `Io` for other spawn failures
/// - `ProbeFailed` for a non-zero exit
pub(crate) async fn run_helper(java: &Path, helper_jar: &Path) -> Result<String, DiscoveryError> {
    let output = timeout(
        PROBE_TIMEOUT,
        Command::new(java)
            .arg("-jar")
            .arg(helper_jar)
            .kill_on_drop(true)
            .output(),
    )
    .await
    .map_err(|_| DiscoveryError::Timeout)??;

    if !output.status.success() {
        return Err(DiscoveryError::ProbeFailed {
            code: output.status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Interpret the helper's two-line output.
///
/// Line 1 is the version string, line 2 the bit width (`32` or `64`).
pub(crate) fn parse_helper_output(stdout: &str) -> Result<(JavaVersion, Architecture), DiscoveryError> {
    let mut lines = stdout.trim().lines();
    let version = parse_java_version(lines.next().unwrap_or_default())?;
    let arch = Architecture::from_bitness(lines.next().unwrap_or_default());
    Ok((version, arch))
}
