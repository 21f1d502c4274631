use std::fs;

use dissect_core::config::{ConfigError, LogLevel, ToolConfig};
use dissect_core::emit::OutputFormat;
use dissect_core::text::{read_lines, split_lines, TextEncoding, TextError};
use tempfile::tempdir;

#[test]
fn split_lines_handles_terminators() {
    assert!(split_lines(b"").is_empty());
    assert_eq!(split_lines(b"\n"), vec![b"".as_slice()]);
    assert_eq!(split_lines(b"a\r\nb"), vec![b"a".as_slice(), b"b".as_slice()]);
    assert_eq!(split_lines(b"a\n\nb\n"), vec![b"a".as_slice(), b"".as_slice(), b"b".as_slice()]);
}

#[test]
fn split_lines_ends_lines_at_lone_carriage_return() {
    assert_eq!(split_lines(b"a\rb\r"), vec![b"a".as_slice(), b"b".as_slice()]);
    assert_eq!(split_lines(b"a\r\rb"), vec![b"a".as_slice(), b"".as_slice(), b"b".as_slice()]);
    assert_eq!(split_lines(b"a\r\n\rb"), vec![b"a".as_slice(), b"".as_slice(), b"b".as_slice()]);
}

#[test]
fn read_lines_pairs_old_mac_files_line_by_line() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ground.txt");
    fs::write(&path, b"90 78\rEB 1B\r").expect("write");

    let lines = read_lines(&path, TextEncoding::Utf8).expect("read");
    assert_eq!(lines, vec!["90 78".to_string(), "EB 1B".to_string()]);
}

#[test]
fn encoding_names_parse_loosely() {
    assert_eq!("UTF-8".parse::<TextEncoding>().expect("utf8"), TextEncoding::Utf8);
    assert_eq!("utf8".parse::<TextEncoding>().expect("utf8"), TextEncoding::Utf8);
    assert_eq!("latin_1".parse::<TextEncoding>().expect("latin1"), TextEncoding::Latin1);
    assert_eq!("ISO-8859-1".parse::<TextEncoding>().expect("latin1"), TextEncoding::Latin1);
    assert_eq!("ascii".parse::<TextEncoding>().expect("ascii"), TextEncoding::Ascii);
    assert!(matches!("ebcdic".parse::<TextEncoding>(), Err(TextError::UnknownEncoding(_))));
}

#[test]
fn read_lines_decodes_latin1() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ground.txt");
    fs::write(&path, b"90 78\n\xE9\n").expect("write");

    let lines = read_lines(&path, TextEncoding::Latin1).expect("latin-1 never fails");
    assert_eq!(lines, vec!["90 78".to_string(), "\u{e9}".to_string()]);
}

#[test]
fn read_lines_reports_invalid_utf8_line() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ground.txt");
    fs::write(&path, b"90 78\n\xE9\n").expect("write");

    match read_lines(&path, TextEncoding::Utf8) {
        Err(TextError::Decode { line, encoding, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(encoding, TextEncoding::Utf8);
        }
        other => panic!("expected decode error, got {other:?}"),
    }
    assert!(read_lines(&path, TextEncoding::Ascii).is_err());
}

#[test]
fn read_lines_missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("missing.txt");
    assert!(matches!(read_lines(&missing, TextEncoding::Utf8), Err(TextError::Io { .. })));
}

#[test]
fn config_loads_yaml() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dissect.yaml");
    fs::write(
        &path,
        "log:\n  level: debug\ndissect:\n  count: 10\n  format: json\nscore:\n  encoding: latin-1\n",
    )
    .expect("write");

    let config = ToolConfig::load(&path).expect("yaml config");
    assert_eq!(config.log.level, LogLevel::Debug);
    assert_eq!(config.dissect.count, Some(10));
    assert_eq!(config.dissect.format, OutputFormat::Json);
    assert_eq!(config.score.encoding, TextEncoding::Latin1);
}

#[test]
fn config_loads_partial_json_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dissect.json");
    fs::write(&path, r#"{"log":{"level":"warn"}}"#).expect("write");

    let config = ToolConfig::load(&path).expect("json config");
    assert_eq!(config.log.level, LogLevel::Warn);
    assert_eq!(config.dissect.count, None);
    assert_eq!(config.dissect.format, OutputFormat::Text);
    assert_eq!(config.score.encoding, TextEncoding::Utf8);
}

#[test]
fn empty_yaml_config_is_default() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("empty.yml");
    fs::write(&path, "").expect("write");
    assert_eq!(ToolConfig::load(&path).expect("empty config"), ToolConfig::default());
}

#[test]
fn config_rejects_unknown_extension_and_missing_file() {
    let dir = tempdir().expect("tempdir");
    let toml = dir.path().join("dissect.toml");
    fs::write(&toml, "").expect("write");
    assert!(matches!(ToolConfig::load(&toml), Err(ConfigError::UnsupportedFormat(_))));
    assert!(matches!(
        ToolConfig::load(&dir.path().join("missing.yaml")),
        Err(ConfigError::Io { .. })
    ));
    assert_eq!(ToolConfig::load_or_default(None).expect("default"), ToolConfig::default());
}

#[test]
fn log_level_parses_and_maps() {
    assert_eq!("trace".parse::<LogLevel>(), Ok(LogLevel::Trace));
    assert!("verbose".parse::<LogLevel>().is_err());
    assert_eq!(LogLevel::default().as_level(), log::Level::Info);
}

#[test]
fn config_accepts_loose_encoding_spellings() {
    let dir = tempdir().expect("tempdir");

    let yaml = dir.path().join("upper.yaml");
    fs::write(&yaml, "score:\n  encoding: UTF-8\n").expect("write");
    assert_eq!(ToolConfig::load(&yaml).expect("yaml").score.encoding, TextEncoding::Utf8);

    let json = dir.path().join("underscore.json");
    fs::write(&json, r#"{"score":{"encoding":"latin_1"}}"#).expect("write");
    assert_eq!(ToolConfig::load(&json).expect("json").score.encoding, TextEncoding::Latin1);

    let bad = dir.path().join("bad.yaml");
    fs::write(&bad, "score:\n  encoding: ebcdic\n").expect("write");
    assert!(matches!(ToolConfig::load(&bad), Err(ConfigError::Yaml { .. })));
}

#[test]
fn encoding_serializes_canonical_name() {
    assert_eq!(serde_json::to_string(&TextEncoding::Latin1).expect("json"), r#""latin-1""#);
}
