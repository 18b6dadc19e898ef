//! Executability checks for candidate paths.

use std::path::Path;

/// Whether `path` names something the current user can execute.
///
/// A bare name such as `java` is looked up on the process search path via the
/// `which` crate; anything with a directory component is checked in place.
/// Missing files and permission errors both collapse to `false`.
pub(crate) fn is_executable(path: &Path) -> bool {
    which::which(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_executable_on_search_path() {
        // sh should exist on any Unix system
        if cfg!(unix) {
            assert!(is_executable(Path::new("sh")));
        }
    }

    #[test]
    fn test_nonexistent_executable() {
        assert!(!is_executable(Path::new("/definitely/not/a/real/java_12345")));
        assert!(!is_executable(Path::new("definitely_not_a_real_executable_12345")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("java");
        std::fs::write(&file, "not a program").unwrap();
        assert!(!is_executable(&file));
    }
}
