//! Dispatch of one interpreted invocation

use crate::cli::{Invocation, SnippetOption, usage};
use crate::config::Config;
use crate::git::resolve_repository;
use crate::operations::install::{InstallRequest, install_snippets};
use crate::operations::listing::{fetch_listing, format_listing};
use crate::operations::open::open_directory;
use crate::operations::rename::rename_snippets;
use crate::system::System;
use crate::utils::fs::ensure_dir_exists;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// The behavior an invocation ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Help,
    List,
    Open,
    /// Rename and/or install ran (or there was nothing to do)
    Manage,
}

/// Coordinates help, listing, opening, renaming and installing
#[non_exhaustive]
pub struct SnippetManager<'src> {
    invocation: Invocation,
    system: &'src dyn System,
}

impl<'src> SnippetManager<'src> {
    #[must_use]
    pub const fn new(invocation: Invocation, system: &'src dyn System) -> Self {
        Self { invocation, system }
    }

    /// Run the invocation
    ///
    /// Priority: help, then list, then (after making sure the snippets
    /// directory exists) open, then rename, then install. Help, list and
    /// open end the run. Rename and install may both run.
    ///
    /// Help never reads the configuration strictly. Listing reads it but
    /// doesn't resolve the install directory.
    ///
    /// # Errors
    ///
    /// Propagates the first failure of the selected behaviors
    pub fn execute(&self) -> Result<Action> {
        debug!("Invocation: {:?}", self.invocation);

        if self.invocation.contains(SnippetOption::Help) {
            print_help(&Config::display_snippets_dir(self.system));
            return Ok(Action::Help);
        }

        let config = Config::load(self.system)?;

        if self.invocation.contains(SnippetOption::List) {
            let entries = fetch_listing(self.system, &config.listing_url, config.listing_timeout())?;
            println!("{}", format_listing(&entries));
            return Ok(Action::List);
        }

        let snippets_dir = config.snippets_dir(self.system)?;
        ensure_dir_exists(self.system, &snippets_dir)?;

        if self.invocation.contains(SnippetOption::Open) {
            open_directory(self.system, config.opener(), &snippets_dir)?;
            return Ok(Action::Open);
        }

        if self.invocation.contains(SnippetOption::Name) {
            rename_snippets(self.system, &snippets_dir)?;
        }

        if let Some(reference) = self.invocation.repository() {
            let url = resolve_repository(reference);
            install_snippets(
                self.system,
                &InstallRequest {
                    url: &url,
                    snippets_dir: &snippets_dir,
                    replace: self.invocation.contains(SnippetOption::Replace),
                    clone_timeout: config.clone_timeout(),
                },
            )?;
        } else if !self.invocation.has_options() {
            print_help(&snippets_dir);
            return Ok(Action::Help);
        }

        Ok(Action::Manage)
    }
}

fn print_help(snippets_dir: &Path) {
    println!("{}", usage(snippets_dir));
}
