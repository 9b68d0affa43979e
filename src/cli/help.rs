//! Usage text

use crate::cli::SnippetOption;
use core::fmt::Write as _;
use std::path::Path;

/// Usage line, one line per option, and the install directory
#[must_use]
pub fn usage(snippets_dir: &Path) -> String {
    let mut text = String::from(
        "Install Xcode code snippets from a Git repository\n\n\
         Usage: xcsnippets [-hnlor] [repository]\n\n\
         Repository: account/repo (GitHub) or a full https:// URL\n\n\
         Options:\n",
    );

    for option in SnippetOption::ALL {
        // Writing to a String can't fail
        let _ = writeln!(text, "  -{}  {}", option.token(), option.description());
    }

    let _ = write!(text, "\nSnippets directory: {}", snippets_dir.display());
    text
}
