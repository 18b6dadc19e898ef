//! Windows registry capability.
//!
//! [`RegExe`] reads the registry through the stock `reg.exe query` command, so
//! the crate carries no Windows-only dependencies and the output parsing is
//! testable on every platform.

use crate::DiscoveryError;
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tokio::process::Command;

/// Which registry view to read.
///
/// 64-bit Windows keeps separate `SOFTWARE` hives for 32-bit and 64-bit
/// programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum RegistryView {
    /// The 64-bit view.
    #[strum(serialize = "64-bit")]
    Bits64,
    /// The 32-bit (WOW6432Node) view.
    #[strum(serialize = "32-bit")]
    Bits32,
}

impl RegistryView {
    /// The `reg.exe` switch selecting this view.
    pub fn reg_switch(&self) -> &'static str {
        match self {
            Self::Bits64 => "/reg:64",
            Self::Bits32 => "/reg:32",
        }
    }
}

/// Read-only access to registry keys.
///
/// Keys are full paths rooted at a hive, e.g.
/// `HKLM\SOFTWARE\JavaSoft\Java Runtime Environment`.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Full paths of the immediate subkeys of `key`.
    ///
    /// Fails if the key cannot be opened or enumerated.
    async fn subkeys(&self, key: &str, view: RegistryView) -> Result<Vec<String>, DiscoveryError>;

    /// The string data of value `name` under `key`, `None` if absent.
    async fn value(
        &self,
        key: &str,
        view: RegistryView,
        name: &str,
    ) -> Result<Option<String>, DiscoveryError>;
}

/// [`Registry`] backed by `reg.exe query`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegExe;

impl RegExe {
    async fn query(&self, args: &[&str]) -> Result<(bool, String), DiscoveryError> {
        let output = Command::new("reg")
            .arg("query")
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;
        Ok((
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
        ))
    }
}

#[async_trait]
impl Registry for RegExe {
    async fn subkeys(&self, key: &str, view: RegistryView) -> Result<Vec<String>, DiscoveryError> {
        let (ok, stdout) = self
            .query(&[key, view.reg_switch()])
            .await
            .map_err(|e| DiscoveryError::Registry {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        if !ok {
            return Err(DiscoveryError::Registry {
                key: key.to_string(),
                message: format!("reg query failed ({view})"),
            });
        }
        Ok(parse_subkeys(key, &stdout))
    }

    async fn value(
        &self,
        key: &str,
        view: RegistryView,
        name: &str,
    ) -> Result<Option<String>, DiscoveryError> {
        let (ok, stdout) = self.query(&[key, "/v", name, view.reg_switch()]).await?;
        // reg.exe exits non-zero when the value is missing
        if !ok {
            return Ok(None);
        }
        Ok(parse_value(name, &stdout))
    }
}

const HIVE_ALIASES: &[(&str, &str)] = &[
    ("HKEY_LOCAL_MACHINE", "HKLM"),
    ("HKEY_CURRENT_USER", "HKCU"),
    ("HKEY_CLASSES_ROOT", "HKCR"),
    ("HKEY_USERS", "HKU"),
    ("HKEY_CURRENT_CONFIG", "HKCC"),
];

/// Rewrite a key to its short-hive, lowercase form for comparison.
fn normalize_key(key: &str) -> String {
    let key = key.trim().trim_end_matches('\\');
    let (hive, rest) = key.split_once('\\').unwrap_or((key, ""));
    let hive = HIVE_ALIASES
        .iter()
        .find(|(long, _)| long.eq_ignore_ascii_case(hive))
        .map(|(_, short)| *short)
        .unwrap_or(hive);
    if rest.is_empty() {
        hive.to_ascii_lowercase()
    } else {
        format!("{hive}\\{rest}").to_ascii_lowercase()
    }
}

/// Pick the immediate subkeys of `key` out of `reg query <key>` output.
///
/// The returned paths are the ones `reg.exe` printed, which can sit under a
/// different parent than `key` when the 32-bit view redirects through
/// `WOW6432Node`.
pub(crate) fn parse_subkeys(key: &str, stdout: &str) -> Vec<String> {
    let listed: Vec<&str> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("HKEY_"))
        .collect();
    let Some(parent) = listed_parent(key, &listed) else {
        return Vec::new();
    };
    let prefix = format!("{parent}\\");
    listed
        .into_iter()
        .filter(|line| {
            normalize_key(line)
                .strip_prefix(&prefix)
                .is_some_and(|child| !child.is_empty() && !child.contains('\\'))
        })
        .map(str::to_string)
        .collect()
}

/// The normalized key `reg.exe` actually listed for a query of `key`.
///
/// That is the requested key itself, or a key with the same last component
/// (the redirected one). Output without a header line is matched through the
/// parent of its first subkey.
fn listed_parent(key: &str, listed: &[&str]) -> Option<String> {
    let requested = normalize_key(key);
    let leaf = requested.rsplit('\\').next().unwrap_or_default().to_string();
    let same_leaf = |candidate: &str| candidate.rsplit('\\').next() == Some(leaf.as_str());

    let normalized: Vec<String> = listed.iter().map(|line| normalize_key(line)).collect();
    if normalized.contains(&requested) {
        return Some(requested);
    }
    if let Some(header) = normalized.iter().find(|k| same_leaf(k)) {
        return Some(header.clone());
    }
    normalized
        .first()
        .and_then(|first| first.rsplit_once('\\'))
        .map(|(parent, _)| parent.to_string())
        .filter(|parent| same_leaf(parent))
}

fn value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s+(.+?)\s{4}(REG_[A-Z_]+)(?:\s{4}(.*))?$").expect("Invalid regex pattern")
    })
}

/// Pick value `name` out of `reg query <key> /v <name>` output.
pub(crate) fn parse_value(name: &str, stdout: &str) -> Option<String> {
    stdout.lines().find_map(|line| {
        let caps = value_regex().captures(line.trim_end())?;
        if !caps[1].eq_ignore_ascii_case(name) {
            return None;
        }
        Some(caps.get(3).map_or("", |m| m.as_str()).to_string())
    })
}
