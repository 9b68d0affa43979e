//! # `XCSnippets`
//!
//! `XCSnippets` installs shareable Xcode code snippets from Git repositories
//! into `~/Library/Developer/Xcode/UserData/CodeSnippets`.
//!
//! ## Usage
//!
//! ```sh
//! xcsnippets account/repo        # install snippets, keeping existing ones
//! xcsnippets -r account/repo     # install, replacing same-named snippets
//! xcsnippets -n                  # rename installed snippets after their titles
//! xcsnippets -l                  # list known snippet repositories
//! xcsnippets -o                  # open the snippets folder
//! ```
//!
//! Flags may be combined (`-nr`) or split, before or after the repository.
//! Set `RUST_LOG=debug` for per-file details.

use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};
use xcsnippets::error::SnippetError;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_target(false)
        .without_time()
        .with_env_filter(filter)
        .init();

    match xcsnippets::run(&args) {
        Ok(_) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<SnippetError>()
                    .map_or(1, SnippetError::exit_code),
            );
        }
    }
}
