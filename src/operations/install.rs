//! Fetch-install: clone a repository and copy its snippets into place

use crate::error::SnippetError;
use crate::git::clone_repository;
use crate::operations::staging::StagingDirectory;
use crate::snippet::SNIPPET_EXTENSION;
use crate::system::System;
use crate::utils::fs::list_files_with_extension;
use anyhow::Result;
use core::time::Duration;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What an install run did with each snippet found in the repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Destination paths written
    pub installed: Vec<PathBuf>,
    /// Destination paths left alone because they already existed
    pub skipped: Vec<PathBuf>,
}

/// Settings for one install run
#[derive(Debug, Clone)]
pub struct InstallRequest<'req> {
    /// Fully resolved clone URL
    pub url: &'req str,
    pub snippets_dir: &'req Path,
    /// Overwrite snippets that already exist in `snippets_dir`
    pub replace: bool,
    pub clone_timeout: Duration,
}

/// Install every snippet at the root of the repository into the snippets directory
///
/// Files copied before a failure stay in place.
///
/// # Errors
///
/// - [`SnippetError::FileSystem`] if staging, listing, removing or copying fails
/// - [`SnippetError::RepositoryNotFound`] if the clone fails
pub fn install_snippets(system: &dyn System, request: &InstallRequest<'_>) -> Result<InstallReport> {
    let staging = StagingDirectory::create(system)?;

    info!("Getting snippets from {}", request.url);
    if let Err(err) = clone_repository(system, request.url, staging.path(), request.clone_timeout)
    {
        staging.discard();
        return Err(err);
    }

    info!("Moving snippets to Xcode user data");
    let candidates = list_files_with_extension(system, staging.path(), SNIPPET_EXTENSION)?;
    debug!("Found {} snippet file(s) in repository", candidates.len());

    let mut report = InstallReport::default();
    for source in candidates {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let destination = request.snippets_dir.join(file_name);

        if system.exists(&destination) {
            if !request.replace {
                debug!("Keeping existing {}", destination.display());
                report.skipped.push(destination);
                continue;
            }

            system.remove_file(&destination).map_err(|e| {
                SnippetError::filesystem(format!(
                    "Failed to remove existing snippet {}: {e}",
                    destination.display()
                ))
            })?;
        }

        system.copy(&source, &destination).map_err(|e| {
            SnippetError::filesystem(format!(
                "Failed to copy {} to {}: {e}",
                source.display(),
                destination.display()
            ))
        })?;
        debug!("Installed {}", destination.display());
        report.installed.push(destination);
    }

    info!(
        "Installed {} snippet(s), kept {} existing",
        report.installed.len(),
        report.skipped.len()
    );

    drop(staging);
    Ok(report)
}
