//! `XCSnippets` - A CLI tool for installing Xcode code snippets from Git repositories
//!
//! This library clones a repository into a temporary staging directory, copies
//! the `.codesnippet` files found at its root into the user's Xcode snippets
//! folder, and can rename installed snippets after the titles they declare.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod operations;
pub mod snippet;
pub mod system;
pub mod utils;

use anyhow::Result;
use cli::{Invocation, usage};
use config::Config;
use operations::manager::{Action, SnippetManager};
use system::{RealSystem, System};

/// Main entry point for the xcsnippets library
///
/// `args` excludes the program name.
pub fn run<S: AsRef<str>>(args: &[S]) -> Result<Action> {
    let system = RealSystem::new();
    run_with_system(args, &system)
}

/// Run against an explicit [`System`]
///
/// Arguments are interpreted before any configuration is read. On invalid
/// arguments the usage text is printed before the error is returned.
pub fn run_with_system<S: AsRef<str>>(args: &[S], system: &dyn System) -> Result<Action> {
    let invocation = match Invocation::parse(args) {
        Ok(invocation) => invocation,
        Err(err) => {
            println!("{}", usage(&Config::display_snippets_dir(system)));
            return Err(err.into());
        }
    };

    SnippetManager::new(invocation, system).execute()
}
