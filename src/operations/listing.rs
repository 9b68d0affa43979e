//! Remote listing of known snippet repositories

use crate::error::SnippetError;
use crate::system::System;
use crate::utils::progress::spinner;
use anyhow::Result;
use core::fmt;
use core::time::Duration;
use serde::Deserialize;
use tracing::debug;

/// One repository advertised by the remote listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteListingEntry {
    pub title: String,
    /// Repository reference, usable as the positional argument
    pub path: String,
}

impl fmt::Display for RemoteListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.title)
    }
}

/// Fetch and decode the listing document at `url`
///
/// # Errors
///
/// Returns [`SnippetError::RemoteListing`] if the request fails, times out,
/// or the body is not a JSON array of `{title, path}` objects.
pub fn fetch_listing(
    system: &dyn System,
    url: &str,
    timeout: Duration,
) -> Result<Vec<RemoteListingEntry>> {
    let progress = spinner("Fetching snippet repositories");
    let result = system.http_get(url, timeout);
    progress.finish_and_clear();

    let body = result.map_err(|e| {
        SnippetError::remote_listing(format!("Failed to fetch {url}: {e}"))
    })?;

    let entries: Vec<RemoteListingEntry> = serde_json::from_str(&body).map_err(|e| {
        SnippetError::remote_listing(format!("Invalid listing document from {url}: {e}"))
    })?;

    debug!("Listing has {} entries", entries.len());
    Ok(entries)
}

/// Render entries one per line, in document order
#[must_use]
pub fn format_listing(entries: &[RemoteListingEntry]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
