//! Java version string parsing with regex extraction.

use crate::{DiscoveryError, JavaVersion};
use regex::Regex;
use std::sync::OnceLock;

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)(?:_(\d+))?").expect("Invalid regex pattern"))
}

/// Parse a Java version from helper output.
///
/// Extracts the first `major.minor.patch` triple, with an optional `_update`
/// suffix, from the text:
///
/// - `1.8.0_151` -> 1.8.0 update 151
/// - `9.0.1` -> 9.0.1 update 0
///
/// # Returns
///
/// `Ok(JavaVersion)` if the pattern matches and every group fits in a `u32`,
/// `Err(DiscoveryError::VersionParseFailed)` otherwise.
pub(crate) fn parse_java_version(output: &str) -> Result<JavaVersion, DiscoveryError> {
    let failed = || DiscoveryError::VersionParseFailed {
        output: output.to_string(),
    };

    let caps = version_regex().captures(output).ok_or_else(failed)?;
    let group = |i: usize| -> Result<u32, DiscoveryError> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().map_err(|_| failed()),
            None => Ok(0),
        }
    };

    Ok(JavaVersion {
        major: group(1)?,
        minor: group(2)?,
        patch: group(3)?,
        update: group(4)?,
    })
}
