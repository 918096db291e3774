//! Cross-platform path utilities for handling Windows and Unix paths

use std::path::{Path, PathBuf};

/// Normalize path for cross-platform compatibility
///
/// Converts backslashes to forward slashes for consistency.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    PathBuf::from(path.as_ref().to_string_lossy().replace('\\', "/"))
}

/// Check that `name` is a single path component without traversal
///
/// Used for names that get joined onto a configured folder.
pub fn is_plain_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains("..") && !name.contains('/') && !name.contains('\\')
}

/// Join a file name onto a resource folder using `/` separators
pub fn resource_path(dir: &str, file_name: &str) -> String {
    let dir = dir.trim_end_matches(['/', '\\']);
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{dir}/{file_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_unix() {
        let path = Path::new("/home/user/file.txt");
        let normalized = normalize_path(path);
        assert_eq!(normalized.to_string_lossy(), "/home/user/file.txt");
    }

    #[test]
    fn test_normalize_path_windows_backslashes() {
        let path = Path::new("C:\\Users\\test\\file.txt");
        let normalized = normalize_path(path);
        assert_eq!(normalized.to_string_lossy(), "C:/Users/test/file.txt");
    }

    #[test]
    fn test_plain_names() {
        assert!(is_plain_name("level"));
        assert!(!is_plain_name("../evil"));
        assert!(!is_plain_name("some/path"));
        assert!(!is_plain_name("some\\path"));
        assert!(!is_plain_name("  "));
    }

    #[test]
    fn test_resource_path() {
        assert_eq!(resource_path("scenes", "a.json"), "scenes/a.json");
        assert_eq!(resource_path("scenes/", "a.json"), "scenes/a.json");
        assert_eq!(resource_path("", "a.json"), "a.json");
    }
}
