use std::fs;

use storebind::config::{ConnectOptions, OptionsError};
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("connect.toml");

    let options = ConnectOptions::load_from(&path).unwrap();
    assert_eq!(options, ConnectOptions::default());
    assert!(options.pure);
}

#[test]
fn loads_connect_table_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("connect.toml");
    fs::write(&path, "[connect]\npure = false\n").unwrap();

    let options = ConnectOptions::load_from(&path).unwrap();
    assert!(!options.pure);
}

#[test]
fn loads_top_level_keys_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("connect.toml");
    fs::write(&path, "pure = false\n").unwrap();

    assert_eq!(ConnectOptions::load_from(&path).unwrap(), ConnectOptions::impure());
}

#[test]
fn connect_table_wins_over_top_level() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("connect.toml");
    fs::write(&path, "pure = false\n\n[connect]\npure = true\n").unwrap();

    assert!(ConnectOptions::load_from(&path).unwrap().pure);
}

#[test]
fn malformed_file_reports_parse_error_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("connect.toml");
    fs::write(&path, "pure = [not toml").unwrap();

    let err = ConnectOptions::load_from(&path).unwrap_err();
    match &err {
        OptionsError::ParseError { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("expected ParseError, got {other:?}"),
    }
    assert!(err.to_string().contains("connect.toml"));
}

#[test]
fn directory_path_reports_read_error() {
    let dir = TempDir::new().unwrap();

    let err = ConnectOptions::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, OptionsError::ReadError { .. }));
}

#[test]
fn with_pure_overrides_loaded_value() {
    let options = ConnectOptions::default().with_pure(false);
    assert_eq!(options, ConnectOptions::impure());
}
