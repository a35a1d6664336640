use clap::{Args, Command};
use softkeys::config::Settings;
use softkeys::error::SoftKeysError;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_settings(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{}", json).unwrap();
    file
}

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.timing.long_press(), Duration::from_millis(250));
    assert_eq!(settings.timing.repeat_start(), Duration::from_millis(250));
    assert_eq!(settings.timing.repeat_interval(), Duration::from_millis(50));
    assert_eq!(settings.floating.minimal_width_px, 300.0);
    assert_eq!(settings.floating.resize_increment_px, 50.0);
    assert_eq!(settings.clipboard.capacity, 0);
    assert!(settings.layout.default_key_height.is_none());
    assert!(settings.validate().is_ok());
}

#[test]
fn test_load_partial_file() {
    let file = write_settings(
        r#"{ "layout": { "defaultKeyHeight": 12 }, "timing": { "longPressMs": 400 } }"#,
    );
    let settings = Settings::load_from_file(file.path()).unwrap();
    assert_eq!(settings.layout.default_key_height, Some(12.0));
    assert_eq!(settings.timing.long_press_ms, 400);
    // Missing fields keep their defaults.
    assert_eq!(settings.timing.repeat_interval_ms, 50);
    assert_eq!(settings.floating.minimal_width_px, 300.0);
}

#[test]
fn test_load_rejects_invalid_values() {
    let file = write_settings(r#"{ "timing": { "repeatIntervalMs": 0 } }"#);
    assert!(matches!(
        Settings::load_from_file(file.path()),
        Err(SoftKeysError::Config(_))
    ));

    let file = write_settings(r#"{ "floating": { "initialWidthRatio": 1.5 } }"#);
    assert!(matches!(
        Settings::load_from_file(file.path()),
        Err(SoftKeysError::Config(_))
    ));
}

#[test]
fn test_load_errors_are_typed() {
    let file = write_settings("not json");
    assert!(matches!(
        Settings::load_from_file(file.path()),
        Err(SoftKeysError::Json(_))
    ));
    assert!(matches!(
        Settings::load_from_file("/definitely/not/here.json"),
        Err(SoftKeysError::Io(_))
    ));
}

#[test]
fn test_cli_overrides_only_explicit_values() {
    let cmd = Settings::augment_args(Command::new("test"));
    let matches = cmd
        .try_get_matches_from(["test", "--long-press-ms", "600", "--clipboard-capacity", "8"])
        .unwrap();
    let cli = <Settings as clap::FromArgMatches>::from_arg_matches(&matches).unwrap();

    let file = write_settings(r#"{ "timing": { "longPressMs": 400, "repeatStartMs": 300 } }"#);
    let mut settings = Settings::load_from_file(file.path()).unwrap();
    settings.merge_from_cli(&cli, &matches);

    assert_eq!(settings.timing.long_press_ms, 600);
    assert_eq!(settings.timing.repeat_start_ms, 300);
    assert_eq!(settings.clipboard.capacity, 8);
}
