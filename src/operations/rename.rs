//! Rename installed snippets after their declared titles

use crate::error::SnippetError;
use crate::snippet::{SNIPPET_EXTENSION, SnippetParser, canonical_name};
use crate::system::System;
use crate::utils::fs::list_files_with_extension;
use crate::utils::path::{file_stem_str, unique_path};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A completed rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Rename every snippet whose identifier still matches its file name
///
/// A snippet named `ABC123.codesnippet` declaring id `ABC123` and title
/// `"my thing"` becomes `MyThing.codesnippet`, or `MyThing1.codesnippet`
/// (then `2`, ...) when that name is taken. Files the user already renamed
/// away from their identifier, files without a title, and files whose name
/// already matches the title up to case are left alone.
///
/// Files renamed before a failure keep their new names.
///
/// # Errors
///
/// Returns [`SnippetError::FileSystem`] if the directory can't be listed or
/// a rename fails.
pub fn rename_snippets(system: &dyn System, snippets_dir: &Path) -> Result<Vec<Renamed>> {
    info!("Renaming snippets in {}", snippets_dir.display());

    let files = list_files_with_extension(system, snippets_dir, SNIPPET_EXTENSION)?;
    let mut renamed = Vec::new();

    for path in files {
        let Some(stem) = file_stem_str(&path) else {
            continue;
        };

        let snippet = SnippetParser::parse_file(system, &path);
        if snippet.title.is_empty() || snippet.id != stem {
            debug!("Skipping {}: already named or no metadata", path.display());
            continue;
        }

        let name = canonical_name(&snippet.title);
        if name.is_empty() {
            warn!(
                "Skipping {}: title '{}' yields an empty file name",
                path.display(),
                snippet.title
            );
            continue;
        }
        // Case-only differences would collide with the file itself on
        // case-insensitive volumes
        if name.to_lowercase() == stem.to_lowercase() {
            debug!("Skipping {}: name differs only in case", path.display());
            continue;
        }

        let target = unique_path(system, snippets_dir, &name, SNIPPET_EXTENSION);
        system.rename(&path, &target).map_err(|e| {
            SnippetError::filesystem(format!(
                "Failed to rename {} to {}: {e}",
                path.display(),
                target.display()
            ))
        })?;

        debug!("Renamed {} -> {}", path.display(), target.display());
        renamed.push(Renamed { from: path, to: target });
    }

    info!("Renamed {} snippet(s)", renamed.len());
    Ok(renamed)
}
