//! Canonical snippet file names

use regex::Regex;
use std::sync::LazyLock;

/// Characters that can't appear in a file name on macOS or Windows
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\\:\x00-\x1f]").expect("file name pattern is valid"));

/// Derive a file stem from a snippet title
///
/// Words are split on whitespace, their first letter upper-cased, and joined
/// without separators: `"my thing"` becomes `"MyThing"`. The rest of each
/// word is kept as written.
#[must_use]
pub fn canonical_name(title: &str) -> String {
    let joined: String = title.split_whitespace().map(capitalize).collect();
    UNSAFE_CHARS.replace_all(&joined, "").into_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
