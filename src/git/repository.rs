//! Repository reference resolution

/// Host assumed for references that carry no scheme
pub const DEFAULT_HOST_PREFIX: &str = "https://github.com/";

const SCHEME: &str = "https://";
const GIT_SUFFIX: &str = ".git";

/// Turn a user-supplied repository reference into a clone-able URL
///
/// Both checks are plain substring tests: a reference that contains
/// `https://` anywhere keeps its host, and one that contains `.git`
/// anywhere is treated as already suffixed.
///
/// ```
/// use xcsnippets::git::resolve_repository;
///
/// assert_eq!(resolve_repository("foo/bar"), "https://github.com/foo/bar.git");
/// assert_eq!(resolve_repository("https://host/x"), "https://host/x.git");
/// ```
#[must_use]
pub fn resolve_repository(reference: &str) -> String {
    let mut url = if reference.contains(SCHEME) {
        reference.to_owned()
    } else {
        format!("{DEFAULT_HOST_PREFIX}{reference}")
    };

    if !url.contains(GIT_SUFFIX) {
        url.push_str(GIT_SUFFIX);
    }

    url
}
