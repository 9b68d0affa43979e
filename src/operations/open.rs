//! Open the snippets directory in the platform file browser

use crate::error::SnippetError;
use crate::system::System;
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

/// Launch `opener` on `dir`
///
/// A non-zero exit from the opener is logged, not returned: the directory
/// exists either way.
///
/// # Errors
///
/// Returns [`SnippetError::FileSystem`] if the opener can't be started.
pub fn open_directory(system: &dyn System, opener: &str, dir: &Path) -> Result<()> {
    info!("Opening {}", dir.display());

    let args = vec![dir.to_string_lossy().into_owned()];
    let output = system.execute(opener, &args, None).map_err(|e| {
        SnippetError::filesystem(format!(
            "Failed to launch '{opener}' for {}: {e}",
            dir.display()
        ))
    })?;

    if !output.success() {
        warn!(
            "'{opener}' exited with {:?}: {}",
            output.status,
            output.stderr.trim()
        );
    }

    Ok(())
}
