//! Filesystem capability.

use crate::detection::is_executable;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// The filesystem primitives discovery needs.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Names of the entries directly inside `path`.
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Whether `path` is a directory, following symlinks.
    async fn is_dir(&self, path: &Path) -> io::Result<bool>;

    /// Whether the current user can execute `path`. Never fails.
    async fn can_execute(&self, path: &Path) -> bool;

    /// Whether `path` exists at all.
    async fn exists(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by the real disk via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name());
        }
        Ok(names)
    }

    async fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(tokio::fs::metadata(path).await?.is_dir())
    }

    async fn can_execute(&self, path: &Path) -> bool {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || is_executable(&path))
            .await
            .unwrap_or(false)
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_dir_and_is_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("jdk-17.jdk")).unwrap();
        std::fs::write(dir.path().join("README"), "x").unwrap();

        let fs = LocalFileSystem;
        let mut names = fs.list_dir(dir.path()).await.unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("README"), OsString::from("jdk-17.jdk")]);

        assert!(fs.is_dir(&dir.path().join("jdk-17.jdk")).await.unwrap());
        assert!(!fs.is_dir(&dir.path().join("README")).await.unwrap());
        assert!(fs.exists(&dir.path().join("README")).await);
    }

    #[tokio::test]
    async fn test_missing_directory_fails() {
        let fs = LocalFileSystem;
        assert!(fs.list_dir(Path::new("/nonexistent/jvm/root")).await.is_err());
        assert!(fs.is_dir(Path::new("/nonexistent/jvm/root")).await.is_err());
        assert!(!fs.exists(Path::new("/nonexistent/jvm/root")).await);
    }

    #[tokio::test]
    async fn test_can_execute_missing_is_false() {
        assert!(!LocalFileSystem.can_execute(Path::new("/nonexistent/bin/java")).await);
    }
}
