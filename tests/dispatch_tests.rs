//! Tests for invocation dispatch priorities

mod common;

use xcsnippets::config::DEFAULT_LISTING_URL;
use xcsnippets::error::SnippetError;
use xcsnippets::operations::Action;
use xcsnippets::run_with_system;
use xcsnippets::system::{MockSystem, System};

const URL: &str = "https://github.com/foo/bar.git";
const LISTING: &str = r#"[{"title": "Swift basics", "path": "foo/bar"}]"#;

fn home_system() -> MockSystem {
    MockSystem::new().with_home(common::HOME).unwrap()
}

#[test]
fn test_help_has_no_side_effects() {
    let system = home_system();

    let action = run_with_system(&["-hnr", "foo/bar"], &system).unwrap();

    assert_eq!(action, Action::Help);
    assert!(system.executed_commands().is_empty());
    assert!(!system.exists(&common::snippets_dir()));
}

#[test]
fn test_list_wins_over_everything_but_help() {
    let system = home_system()
        .with_http_response(DEFAULT_LISTING_URL, LISTING)
        .unwrap();

    let action = run_with_system(&["-lon", "foo/bar"], &system).unwrap();

    assert_eq!(action, Action::List);
    assert!(system.executed_commands().is_empty());
    assert!(!system.exists(&common::snippets_dir()));
}

#[test]
fn test_list_uses_overridden_url() {
    let system = home_system()
        .with_env("XCSNIPPETS_LISTING_URL", "https://example.test/list.json")
        .unwrap()
        .with_http_response("https://example.test/list.json", LISTING)
        .unwrap();

    assert_eq!(run_with_system(&["-l"], &system).unwrap(), Action::List);
}

#[test]
fn test_list_failure_is_remote_listing_error() {
    let system = home_system();

    let err = run_with_system(&["-l"], &system).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SnippetError>(),
        Some(SnippetError::RemoteListing { .. })
    ));
}

#[test]
fn test_open_creates_directory_then_launches_opener() {
    let system = home_system()
        .with_env("XCSNIPPETS_CONFIG", "/nonexistent/config.yaml")
        .unwrap();

    let action = run_with_system(&["-or", "foo/bar"], &system).unwrap();

    assert_eq!(action, Action::Open);
    assert!(system.is_dir(&common::snippets_dir()));
    let commands = system.executed_commands();
    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0].last().unwrap(),
        &common::snippets_dir().to_string_lossy().into_owned()
    );
}

#[test]
fn test_configured_opener_is_used() {
    let system = home_system()
        .with_file(
            format!("{}/.config/xcsnippets/config.yaml", common::HOME),
            b"opener: my-browser\n",
        )
        .unwrap();

    run_with_system(&["-o"], &system).unwrap();

    assert_eq!(system.executed_commands()[0][0], "my-browser");
}

#[test]
fn test_rename_then_install_in_one_invocation() {
    let dir = common::snippets_dir();
    let system = home_system()
        .with_file(
            dir.join("OLD1.codesnippet"),
            common::snippet_plist("OLD1", "old thing").as_bytes(),
        )
        .unwrap()
        .with_remote(
            URL,
            &[(
                "NEW1.codesnippet",
                common::snippet_plist("NEW1", "new thing").as_bytes(),
            )],
        )
        .unwrap();

    let action = run_with_system(&["-n", "foo/bar"], &system).unwrap();

    assert_eq!(action, Action::Manage);
    // Renaming runs before the install, so the fresh file keeps its name
    assert!(system.exists(&dir.join("OldThing.codesnippet")));
    assert!(system.exists(&dir.join("NEW1.codesnippet")));
    assert!(!system.exists(&dir.join("NewThing.codesnippet")));
}

#[test]
fn test_install_with_replace_flag_after_repository() {
    let dir = common::snippets_dir();
    let system = home_system()
        .with_file(dir.join("A.codesnippet"), b"old")
        .unwrap()
        .with_remote(URL, &[("A.codesnippet", b"new")])
        .unwrap();

    run_with_system(&["foo/bar", "-r"], &system).unwrap();

    assert_eq!(system.read_to_string(&dir.join("A.codesnippet")).unwrap(), "new");
}

#[test]
fn test_unknown_repository_exit_code() {
    let system = home_system();

    let err = run_with_system(&["nobody/nothing"], &system).unwrap_err();
    let snippet_err = err.downcast_ref::<SnippetError>().unwrap();

    assert_eq!(snippet_err.exit_code(), 3);
    assert!(system.temp_entries().is_empty());
}

#[test]
fn test_replace_alone_only_ensures_directory() {
    let system = home_system();

    let action = run_with_system(&["-r"], &system).unwrap();

    assert_eq!(action, Action::Manage);
    assert!(system.is_dir(&common::snippets_dir()));
    assert!(system.executed_commands().is_empty());
}

#[test]
fn test_lone_dash_prints_help() {
    let system = home_system();

    let action = run_with_system(&["-"], &system).unwrap();

    assert_eq!(action, Action::Help);
}

#[test]
fn test_zero_arguments_is_invalid() {
    let system = home_system();
    let args: Vec<String> = Vec::new();

    let err = run_with_system(&args, &system).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SnippetError>(),
        Some(SnippetError::InvalidArguments { .. })
    ));
}

#[test]
fn test_unknown_option_is_invalid_without_side_effects() {
    let system = home_system()
        .with_remote(URL, &[("A.codesnippet", b"new")])
        .unwrap();

    let err = run_with_system(&["-nz", "foo/bar"], &system).unwrap_err();

    assert_eq!(err.downcast_ref::<SnippetError>().unwrap().exit_code(), 1);
    assert!(system.executed_commands().is_empty());
    assert!(!system.exists(&common::snippets_dir()));
}

#[test]
fn test_missing_home_is_filesystem_error() {
    let system = MockSystem::new();

    let err = run_with_system(&["-o"], &system).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SnippetError>(),
        Some(SnippetError::FileSystem { .. })
    ));
}

fn system_with_bad_config() -> MockSystem {
    home_system()
        .with_file(
            format!("{}/.config/xcsnippets/config.yaml", common::HOME),
            b"bogus_key: 1\n",
        )
        .unwrap()
}

#[test]
fn test_help_ignores_invalid_configuration() {
    let system = system_with_bad_config();

    let action = run_with_system(&["-h"], &system).unwrap();

    assert_eq!(action, Action::Help);
    assert!(!system.exists(&common::snippets_dir()));
}

#[test]
fn test_unknown_option_reported_before_invalid_configuration() {
    let system = system_with_bad_config();

    let err = run_with_system(&["-x"], &system).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SnippetError>(),
        Some(SnippetError::InvalidArguments { .. })
    ));
}

#[test]
fn test_invalid_configuration_fails_behaviors_that_use_it() {
    let system = system_with_bad_config();

    let err = run_with_system(&["-n"], &system).unwrap_err();

    assert_eq!(err.downcast_ref::<SnippetError>().unwrap().exit_code(), 5);
}

#[test]
fn test_list_works_without_home() {
    let system = MockSystem::new()
        .with_http_response(DEFAULT_LISTING_URL, LISTING)
        .unwrap();

    assert_eq!(run_with_system(&["-l"], &system).unwrap(), Action::List);
}

#[test]
fn test_help_works_without_home() {
    assert_eq!(
        run_with_system(&["-h"], &MockSystem::new()).unwrap(),
        Action::Help
    );
}
