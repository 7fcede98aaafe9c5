//! Tests for TextConfig.
//!
//! Tests cover:
//! - JSON loading from strings and files
//! - Derived encoder parameters
//! - Building input pipelines for both modes

use chat_htm::config::{EncoderConfig, InputGrid, TextConfig};
use chat_htm::runtime::InputMode;
use chat_htm::stubs::{PredictionPolicy, StubEngine};
use chat_htm::{ChatHtmError, TextRuntime};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_character_document() {
    let config = TextConfig::from_json_str(
        r#"{
            "mode": "character",
            "input": { "rows": 10, "cols": 40 },
            "encoder": { "active_bits": 11, "min_value": 32, "max_value": 126 }
        }"#,
    )
    .unwrap();

    let params = config.scalar_params().unwrap();
    assert_eq!(params.n, 400);
    assert_eq!(params.w, 11);
    assert_eq!(params.min_val, 32);
    assert_eq!(params.max_val, 126);
}

#[test]
fn test_config_word_defaults() {
    let config = TextConfig {
        mode: InputMode::WordRows,
        ..Default::default()
    };
    assert_eq!(config.input_bits().unwrap(), 540);
    let params = config.word_row_params();
    assert_eq!(params.rows, 5);
    assert_eq!(params.cols, 108);
    assert_eq!(params.letter_bits, 4);
}

#[test]
fn test_config_custom_alphabet() {
    let config = TextConfig {
        mode: InputMode::WordRows,
        input: Some(InputGrid { rows: 4, cols: 8 }),
        encoder: EncoderConfig {
            letter_bits: Some(2),
            alphabet: Some("abc".to_string()),
            ..Default::default()
        },
    };
    let pipeline = config.build_pipeline_from_text("a cab").unwrap();
    assert_eq!(pipeline.mode(), InputMode::WordRows);
    assert_eq!(pipeline.encoded_bits(), 32);
    assert_eq!(pipeline.cursor().size(), 2);
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("text.json");
    let config = TextConfig {
        input: Some(InputGrid { rows: 1, cols: 64 }),
        ..Default::default()
    };
    std::fs::write(&path, config.to_json().unwrap()).unwrap();

    let loaded = TextConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    assert!(matches!(
        TextConfig::from_json_file(&path),
        Err(ChatHtmError::Io(_))
    ));
}

#[test]
fn test_config_malformed_json() {
    assert!(matches!(
        TextConfig::from_json_str("{ not json"),
        Err(ChatHtmError::Config(_))
    ));
}

#[test]
fn test_config_pipeline_from_corpus_file() {
    let mut corpus = NamedTempFile::new().unwrap();
    corpus.write_all(b"hello world").unwrap();
    corpus.flush().unwrap();
    let path = corpus.path();

    let config = TextConfig::default();
    let pipeline = config.build_pipeline(path).unwrap();
    assert_eq!(pipeline.mode(), InputMode::Character);
    assert_eq!(pipeline.cursor().size(), 11);
    assert_eq!(pipeline.cursor().source(), path.display().to_string());

    let engine = StubEngine::new(config.input_bits().unwrap(), 1, PredictionPolicy::Never);
    let mut rt = TextRuntime::new(engine, pipeline, "from-config").unwrap();
    rt.step(3).unwrap();
    assert_eq!(rt.last_char(), Some(b'l'));
}
