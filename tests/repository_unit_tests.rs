//! Unit tests for repository reference resolution

use xcsnippets::git::resolve_repository;

#[test]
fn short_reference_gets_github_host_and_suffix() {
    assert_eq!(resolve_repository("foo/bar"), "https://github.com/foo/bar.git");
}

#[test]
fn full_url_with_suffix_is_unchanged() {
    assert_eq!(resolve_repository("https://host/x.git"), "https://host/x.git");
}

#[test]
fn full_url_without_suffix_gets_suffix() {
    assert_eq!(resolve_repository("https://host/x"), "https://host/x.git");
}

#[test]
fn checks_are_substring_tests() {
    // Scheme not at the start still counts
    assert_eq!(
        resolve_repository("mirror+https://host/x"),
        "mirror+https://host/x.git"
    );
    // `.git` in the middle counts as already suffixed
    assert_eq!(
        resolve_repository("https://host/x.gitlab/y"),
        "https://host/x.gitlab/y"
    );
    // http is not https
    assert_eq!(
        resolve_repository("http://host/x"),
        "https://github.com/http://host/x.git"
    );
}
