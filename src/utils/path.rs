//! Path helpers

use crate::system::System;
use std::path::{Path, PathBuf};

/// Check if a path has exactly the given extension (case-sensitive)
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// File name without its extension, if it is valid UTF-8
#[must_use]
pub fn file_stem_str(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// First free path among `dir/stem.ext`, `dir/stem1.ext`, `dir/stem2.ext`, ...
#[must_use]
pub fn unique_path(system: &dyn System, dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let candidate = dir.join(format!("{stem}.{extension}"));
    if !system.exists(&candidate) {
        return candidate;
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = dir.join(format!("{stem}{counter}.{extension}"));
        if !system.exists(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b.codesnippet"), "codesnippet"));
        assert!(!has_extension(Path::new("b.CODESNIPPET"), "codesnippet"));
        assert!(!has_extension(Path::new("b.codesnippet.bak"), "codesnippet"));
        assert!(!has_extension(Path::new("codesnippet"), "codesnippet"));
    }

    #[test]
    fn test_unique_path() {
        let system = MockSystem::new()
            .with_file("/s/MyThing.codesnippet", b"")
            .unwrap()
            .with_file("/s/MyThing1.codesnippet", b"")
            .unwrap();

        assert_eq!(
            unique_path(&system, Path::new("/s"), "Other", "codesnippet"),
            PathBuf::from("/s/Other.codesnippet")
        );
        assert_eq!(
            unique_path(&system, Path::new("/s"), "MyThing", "codesnippet"),
            PathBuf::from("/s/MyThing2.codesnippet")
        );
    }
}
