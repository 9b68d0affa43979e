//! Configuration management module
//!
//! Handles the optional YAML configuration file, JSON schema validation, and
//! environment overrides

pub mod schema;
pub mod yaml;

use crate::error::SnippetError;
use crate::system::System;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Install directory, relative to the user's home directory
pub const SNIPPETS_SUBPATH: &str = "Library/Developer/Xcode/UserData/CodeSnippets";

/// Where the list of known snippet repositories is published
pub const DEFAULT_LISTING_URL: &str =
    "https://raw.githubusercontent.com/xcsnippets/xcsnippets/main/repositories.json";

/// Overrides the configuration file location
pub const CONFIG_PATH_ENV: &str = "XCSNIPPETS_CONFIG";
/// Overrides `snippets_dir`
pub const SNIPPETS_DIR_ENV: &str = "XCSNIPPETS_DIR";
/// Overrides `listing_url`
pub const LISTING_URL_ENV: &str = "XCSNIPPETS_LISTING_URL";

const DEFAULT_CLONE_TIMEOUT_SECS: u64 = 300;
const DEFAULT_LISTING_TIMEOUT_SECS: u64 = 30;
/// Upper bound for both timeouts, matching the schema's `maximum`
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Install directory override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippets_dir: Option<PathBuf>,

    /// URL of the remote listing document
    pub listing_url: String,

    pub clone_timeout_secs: u64,

    pub listing_timeout_secs: u64,

    /// Program used by `-o`, platform default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opener: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snippets_dir: None,
            listing_url: DEFAULT_LISTING_URL.to_owned(),
            clone_timeout_secs: DEFAULT_CLONE_TIMEOUT_SECS,
            listing_timeout_secs: DEFAULT_LISTING_TIMEOUT_SECS,
            opener: None,
        }
    }
}

impl Config {
    /// Load the configuration file (if any) and apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns a [`SnippetError::Configuration`] if the file can't be read,
    /// parsed or validated, or an override is invalid
    pub fn load(system: &dyn System) -> anyhow::Result<Self> {
        let mut config = match Self::config_path(system) {
            Some(path) => yaml::load_config(system, &path)?,
            None => Self::default(),
        };

        if let Ok(dir) = system.env_var(SNIPPETS_DIR_ENV)
            && !dir.is_empty()
        {
            config.snippets_dir = Some(PathBuf::from(dir));
        }

        if let Ok(url) = system.env_var(LISTING_URL_ENV)
            && !url.is_empty()
        {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(SnippetError::configuration(format!(
                    "{LISTING_URL_ENV} must be an http(s) URL, got '{url}'"
                ))
                .into());
            }
            config.listing_url = url;
        }

        Ok(config)
    }

    /// Path of the configuration file to read, if one should be read
    fn config_path(system: &dyn System) -> Option<PathBuf> {
        if let Ok(path) = system.env_var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }

        system
            .config_dir()
            .map(|dir| dir.join("xcsnippets").join("config.yaml"))
    }

    /// Resolve the install directory
    ///
    /// # Errors
    ///
    /// Returns a [`SnippetError::FileSystem`] if no override is configured
    /// and the home directory can't be determined
    pub fn snippets_dir(&self, system: &dyn System) -> Result<PathBuf, SnippetError> {
        if let Some(dir) = &self.snippets_dir {
            return Ok(dir.clone());
        }

        system
            .home_dir()
            .map(|home| home.join(SNIPPETS_SUBPATH))
            .ok_or_else(|| {
                SnippetError::filesystem("Cannot determine home directory for the snippets folder")
            })
    }

    /// Install directory for help and usage text
    ///
    /// Never fails: an unusable configuration falls back to the default
    /// location, and an unknown home directory is shown as `~`.
    #[must_use]
    pub fn display_snippets_dir(system: &dyn System) -> PathBuf {
        let configured = match Self::load(system) {
            Ok(config) => config.snippets_dir(system).ok(),
            Err(err) => {
                debug!("Ignoring configuration for help text: {err:#}");
                None
            }
        };

        configured
            .or_else(|| Self::default().snippets_dir(system).ok())
            .unwrap_or_else(|| PathBuf::from("~").join(SNIPPETS_SUBPATH))
    }

    /// Clone timeout, capped at [`MAX_TIMEOUT_SECS`]
    #[must_use]
    pub const fn clone_timeout(&self) -> Duration {
        bounded_timeout(self.clone_timeout_secs)
    }

    /// Listing timeout, capped at [`MAX_TIMEOUT_SECS`]
    #[must_use]
    pub const fn listing_timeout(&self) -> Duration {
        bounded_timeout(self.listing_timeout_secs)
    }

    /// Program used to open a directory in the platform's file browser
    #[must_use]
    pub fn opener(&self) -> &str {
        if let Some(opener) = &self.opener {
            return opener;
        }

        if cfg!(target_os = "macos") {
            "open"
        } else if cfg!(target_os = "windows") {
            "explorer"
        } else {
            "xdg-open"
        }
    }
}

const fn bounded_timeout(secs: u64) -> Duration {
    if secs > MAX_TIMEOUT_SECS {
        Duration::from_secs(MAX_TIMEOUT_SECS)
    } else {
        Duration::from_secs(secs)
    }
}
