use lang_agent::config::{self, find_project_root};
use std::fs;

#[test]
fn project_root_is_nearest_manifest_ancestor() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("project");
    let nested = root.join("src").join("agent");
    fs::create_dir_all(&nested).unwrap();
    fs::write(root.join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();

    assert_eq!(find_project_root(&nested), Some(root.clone()));
    assert_eq!(find_project_root(&root), Some(root));
}

#[test]
fn manifest_directory_is_not_a_root_marker() {
    let dir = tempfile::tempdir().unwrap();
    let start = dir.path().join("a");
    fs::create_dir_all(start.join("Cargo.toml")).unwrap();

    let found = find_project_root(&start);
    assert_ne!(found.as_deref(), Some(start.as_path()));
}

#[test]
fn missing_env_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Cargo.toml"), "").unwrap();
    assert_eq!(config::load_env_file(dir.path()).unwrap(), None);
}

#[test]
fn env_file_at_root_overrides_process_values() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("crates").join("inner");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.path().join("Cargo.toml"), "").unwrap();
    fs::write(
        dir.path().join(".env"),
        "LANG_AGENT_TEST_OVERRIDE=from-file\nLANG_AGENT_TEST_FRESH=\"quoted value\"\n",
    )
    .unwrap();

    // SAFETY: variables are unique to this test.
    unsafe { std::env::set_var("LANG_AGENT_TEST_OVERRIDE", "from-process") };

    let loaded = config::load_env_file(&nested).unwrap();
    assert_eq!(loaded, Some(dir.path().join(".env")));
    assert_eq!(
        std::env::var("LANG_AGENT_TEST_OVERRIDE").unwrap(),
        "from-file"
    );
    assert_eq!(
        std::env::var("LANG_AGENT_TEST_FRESH").unwrap(),
        "quoted value"
    );
}

#[test]
fn env_file_in_start_dir_is_used_without_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "LANG_AGENT_TEST_NO_ROOT=yes\n").unwrap();

    assert_eq!(find_project_root(dir.path()), None);
    let loaded = config::load_env_file(dir.path()).unwrap();
    assert_eq!(loaded, Some(dir.path().join(".env")));
    assert_eq!(std::env::var("LANG_AGENT_TEST_NO_ROOT").unwrap(), "yes");
}

#[test]
fn malformed_env_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Cargo.toml"), "").unwrap();
    fs::write(
        dir.path().join(".env"),
        "LANG_AGENT_TEST_BEFORE_BAD=set\nLANG_AGENT_TEST_BAD=\"unterminated\n",
    )
    .unwrap();

    let err = config::load_env_file(dir.path()).unwrap_err();
    assert!(matches!(err, lang_agent::error::Error::Config(_)));
    // lines ahead of the bad one are already applied
    assert_eq!(
        std::env::var("LANG_AGENT_TEST_BEFORE_BAD").unwrap(),
        "set"
    );
}
