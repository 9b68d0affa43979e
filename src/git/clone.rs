//! Shallow clone through the external `git` client

use crate::error::SnippetError;
use crate::system::System;
use crate::utils::progress::spinner;
use anyhow::Result;
use core::time::Duration;
use std::path::Path;
use tracing::debug;

/// Clone `url` into the existing, empty `destination` directory
///
/// # Errors
///
/// Returns [`SnippetError::RepositoryNotFound`] when git can't be started,
/// exits non-zero, or runs past `timeout`.
pub fn clone_repository(
    system: &dyn System,
    url: &str,
    destination: &Path,
    timeout: Duration,
) -> Result<()> {
    let args = vec![
        "clone".to_owned(),
        "--depth".to_owned(),
        "1".to_owned(),
        "--quiet".to_owned(),
        url.to_owned(),
        destination.to_string_lossy().into_owned(),
    ];

    let progress = spinner(format!("Cloning {url}"));
    let result = system.execute("git", &args, Some(timeout));
    progress.finish_and_clear();

    let output = result.map_err(|e| {
        SnippetError::repository_not_found(format!("Failed to run git clone for '{url}': {e}"))
    })?;

    if output.timed_out {
        return Err(SnippetError::repository_not_found(format!(
            "Cloning '{url}' timed out after {}s",
            timeout.as_secs()
        ))
        .into());
    }

    if !output.success() {
        let stderr = output.stderr.trim();
        debug!("git clone exited with {:?}: {stderr}", output.status);
        return Err(SnippetError::repository_not_found(if stderr.is_empty() {
            format!("Failed to clone repository '{url}'")
        } else {
            format!("Failed to clone repository '{url}': {stderr}")
        })
        .into());
    }

    debug!("Repository cloned into {}", destination.display());
    Ok(())
}
