//! Ephemeral clone destination

use crate::error::SnippetError;
use crate::system::{System, TempDirHandle};
use crate::utils::fs::remove_dir_safe;
use std::path::Path;
use tracing::{debug, info, warn};

/// Name prefix of staging directories under the system temp root
pub const STAGING_PREFIX: &str = "TEMP_SNIPPETS";

/// Uniquely named temporary directory owned by one install run
///
/// The directory is removed when the guard is dropped, on every exit path.
/// Removing it early with [`StagingDirectory::discard`] is allowed; the
/// final removal then has nothing to do.
pub struct StagingDirectory<'src> {
    handle: Box<dyn TempDirHandle>,
    system: &'src dyn System,
}

impl<'src> StagingDirectory<'src> {
    /// Create a fresh staging directory
    ///
    /// # Errors
    ///
    /// Returns [`SnippetError::FileSystem`] if the directory can't be created
    pub fn create(system: &'src dyn System) -> Result<Self, SnippetError> {
        let handle = system.create_temp_dir(STAGING_PREFIX).map_err(|e| {
            SnippetError::filesystem(format!("Failed to create staging directory: {e}"))
        })?;
        debug!("Staging directory: {}", handle.path().display());

        Ok(Self { handle, system })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.handle.path()
    }

    /// Remove the directory now instead of waiting for drop
    pub fn discard(&self) {
        if let Err(err) = remove_dir_safe(self.system, self.path()) {
            warn!("{err}");
        }
    }
}

impl Drop for StagingDirectory<'_> {
    fn drop(&mut self) {
        info!("Cleaning up");
        self.discard();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn test_removed_on_drop() {
        let system = MockSystem::new();
        let path = {
            let staging = StagingDirectory::create(&system).unwrap();
            system
                .write(&staging.path().join("a.codesnippet"), b"a")
                .unwrap();
            staging.path().to_path_buf()
        };

        assert!(!system.exists(&path));
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(STAGING_PREFIX)
        );
    }

    #[test]
    fn test_discard_then_drop() {
        let system = MockSystem::new();
        let staging = StagingDirectory::create(&system).unwrap();
        let path = staging.path().to_path_buf();

        staging.discard();
        assert!(!system.exists(&path));
        drop(staging);
        assert!(!system.exists(&path));
    }
}
