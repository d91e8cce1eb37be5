//! Host configuration loading from TOML and JSON.

use std::io::Write;

use flipcard_runtime::{ConfigError, DEFAULT_MAX_TURNS, FlipHost, HostConfig};
use flipcard_widgets::flip_card::{FlipCard, FlipCardProps, FlipNodes};
use flipcard_widgets::{FocusTree, Pane};
use web_time::Duration;

#[test]
fn toml_file_overrides_every_key() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "settle_delay_ms = 450\ndefer_delay_ms = 10\nmax_turns_per_advance = 16"
    )
    .expect("write config");

    let config = HostConfig::from_toml_file(file.path()).expect("load config");
    assert_eq!(config.timing.settle_delay, Duration::from_millis(450));
    assert_eq!(config.timing.defer_delay, Duration::from_millis(10));
    assert_eq!(config.max_turns_per_advance, 16);
}

#[test]
fn empty_toml_is_the_default() {
    assert_eq!(HostConfig::from_toml_str("").unwrap(), HostConfig::default());
}

#[test]
fn json_partial_override() {
    let config = HostConfig::from_json_str(r#"{"max_turns_per_advance": 4}"#).unwrap();
    assert_eq!(config.max_turns_per_advance, 4);
    assert_eq!(config.timing.settle_delay, Duration::from_millis(600));
}

#[test]
fn json_file_loads() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{"settle_delay_ms": 300}}"#).expect("write config");
    let config = HostConfig::from_json_file(file.path()).expect("load config");
    assert_eq!(config.timing.settle_delay, Duration::from_millis(300));
    assert_eq!(config.max_turns_per_advance, DEFAULT_MAX_TURNS);
}

#[test]
fn out_of_range_values_are_rejected() {
    let err = HostConfig::from_toml_str("settle_delay_ms = 0\nmax_turns_per_advance = 0").unwrap_err();
    match err {
        ConfigError::Validation(problems) => assert_eq!(problems.len(), 2),
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn unknown_keys_are_rejected() {
    let err = HostConfig::from_toml_str("settle_delay = 600").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err}");
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = HostConfig::from_json_str("{").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("JSON error"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = HostConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn loaded_settle_delay_drives_the_host() {
    let config = HostConfig::from_toml_str("settle_delay_ms = 100").unwrap();
    let focus = FocusTree::new()
        .with_node(10, None)
        .with_node(11, Some(10))
        .with_node(12, Some(10));
    let card = FlipCard::new(
        FlipCardProps::new().disabled(true),
        FlipNodes::new(10, 11, 12),
        ["front", "back"],
    );
    let mut host = FlipHost::new(card, focus, config);

    host.set_flipped(true);
    host.turn();
    host.advance(Duration::from_millis(99));
    assert_eq!(host.card().controller().visibility().suppressed(), None);
    host.advance(Duration::from_millis(1));
    assert_eq!(
        host.card().controller().visibility().suppressed(),
        Some(Pane::Front)
    );
}
