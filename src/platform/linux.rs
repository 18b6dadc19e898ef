//! Linux candidates.

use super::{Enumerator, DEFAULT_JAVA};
use crate::Install;
use async_trait::async_trait;

/// Well-known Linux Java locations.
const LINUX_JAVAS: &[&str] = &[DEFAULT_JAVA, "/opt/java/bin/java", "/usr/bin/java"];

/// Linux enumerator: a fixed list, no directory scanning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxEnumerator;

#[async_trait]
impl Enumerator for LinuxEnumerator {
    async fn enumerate(&self) -> Vec<Install> {
        LINUX_JAVAS.iter().copied().map(Install::new).collect()
    }
}
