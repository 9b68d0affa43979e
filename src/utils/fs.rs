//! File system utilities

use crate::error::SnippetError;
use crate::system::System;
use crate::utils::path::has_extension;
use std::path::{Path, PathBuf};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir_exists(system: &dyn System, dir_path: &Path) -> Result<(), SnippetError> {
    if !system.exists(dir_path) {
        system.create_dir_all(dir_path).map_err(|e| {
            SnippetError::filesystem(format!(
                "Failed to create directory {}: {e}",
                dir_path.display()
            ))
        })?;
    } else if !system.is_dir(dir_path) {
        return Err(SnippetError::filesystem(format!(
            "Path exists but is not a directory: {}",
            dir_path.display()
        )));
    }
    Ok(())
}

/// Remove a directory and all its contents; an absent directory is not an error
pub fn remove_dir_safe(system: &dyn System, dir_path: &Path) -> Result<(), SnippetError> {
    if system.exists(dir_path) && system.is_dir(dir_path) {
        system.remove_dir_all(dir_path).map_err(|e| {
            SnippetError::filesystem(format!(
                "Failed to remove directory {}: {e}",
                dir_path.display()
            ))
        })?;
    }
    Ok(())
}

/// Files directly inside `dir_path` whose extension is exactly `extension`
pub fn list_files_with_extension(
    system: &dyn System,
    dir_path: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, SnippetError> {
    let entries = system.read_dir(dir_path).map_err(|e| {
        SnippetError::filesystem(format!(
            "Failed to read directory {}: {e}",
            dir_path.display()
        ))
    })?;

    Ok(entries
        .into_iter()
        .filter(|path| has_extension(path, extension) && system.is_file(path))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn test_ensure_dir_exists() {
        let system = MockSystem::new()
            .with_file("/test/file.txt", b"content")
            .unwrap();

        ensure_dir_exists(&system, Path::new("/test/a/b")).unwrap();
        assert!(system.is_dir(Path::new("/test/a/b")));

        // Existing directory is fine
        ensure_dir_exists(&system, Path::new("/test/a/b")).unwrap();

        let err = ensure_dir_exists(&system, Path::new("/test/file.txt")).unwrap_err();
        assert!(matches!(err, SnippetError::FileSystem { .. }));
    }

    #[test]
    fn test_remove_dir_safe_twice() {
        let system = MockSystem::new()
            .with_file("/stage/a.codesnippet", b"a")
            .unwrap();

        remove_dir_safe(&system, Path::new("/stage")).unwrap();
        assert!(!system.exists(Path::new("/stage")));
        remove_dir_safe(&system, Path::new("/stage")).unwrap();
    }

    #[test]
    fn test_list_files_with_extension() {
        let system = MockSystem::new()
            .with_file("/stage/b.codesnippet", b"b")
            .unwrap()
            .with_file("/stage/a.codesnippet", b"a")
            .unwrap()
            .with_file("/stage/README.md", b"readme")
            .unwrap()
            .with_file("/stage/upper.CODESNIPPET", b"u")
            .unwrap()
            .with_file("/stage/nested/c.codesnippet", b"c")
            .unwrap()
            .with_dir("/stage/dir.codesnippet")
            .unwrap();

        let files =
            list_files_with_extension(&system, Path::new("/stage"), "codesnippet").unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("/stage/a.codesnippet"),
                PathBuf::from("/stage/b.codesnippet"),
            ]
        );
    }
}
