//! Tests for CharCursor.
//!
//! Tests cover:
//! - Loading from files and memory
//! - Wraparound and epoch counting
//! - Reset and peeking

use chat_htm::cursor::{CharCursor, SymbolCursor};
use chat_htm::ChatHtmError;
use proptest::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_corpus(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_char_from_file() {
    let file = write_corpus(b"hello\nworld");
    let cursor = CharCursor::from_file(file.path()).unwrap();
    assert_eq!(cursor.size(), 11);
    assert_eq!(cursor.text(), b"hello\nworld");
    assert_eq!(cursor.source(), file.path().display().to_string());
}

#[test]
fn test_char_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    match CharCursor::from_file(&path) {
        Err(ChatHtmError::CorpusUnreadable { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected CorpusUnreadable, got {:?}", other),
    }
}

#[test]
fn test_char_empty_file() {
    let file = write_corpus(b"");
    let result = CharCursor::from_file(file.path());
    assert!(matches!(result, Err(ChatHtmError::EmptyCorpus { .. })));
}

#[test]
fn test_char_wraps_every_epoch() {
    let mut cursor = CharCursor::from_text("abc").unwrap();
    let seen: Vec<u8> = (0..7).map(|_| cursor.next()).collect();
    assert_eq!(seen, b"abcabca");
    assert_eq!(cursor.epoch(), 2);
    assert_eq!(cursor.position(), 1);
    assert_eq!(cursor.total_steps(), 7);
}

#[test]
fn test_char_reset() {
    let mut cursor = CharCursor::from_text("xyz").unwrap();
    for _ in 0..5 {
        cursor.next();
    }
    cursor.reset();
    assert_eq!(cursor.position(), 0);
    assert_eq!(cursor.epoch(), 0);
    assert_eq!(cursor.total_steps(), 0);
    assert_eq!(cursor.next(), b'x');
}

#[test]
fn test_char_peek_does_not_advance() {
    let mut cursor = CharCursor::from_text("pq").unwrap();
    assert_eq!(cursor.peek(), b'p');
    assert_eq!(cursor.peek(), b'p');
    cursor.next();
    assert_eq!(cursor.peek(), b'q');
    assert_eq!(cursor.peek_at(-1), b'p');
    assert_eq!(cursor.total_steps(), 1);
}

#[test]
fn test_char_single_byte_corpus() {
    let mut cursor = CharCursor::from_text("z").unwrap();
    for i in 1..=4 {
        assert_eq!(cursor.next(), b'z');
        assert_eq!(cursor.epoch(), i);
    }
}

proptest! {
    #[test]
    fn prop_position_and_epoch_track_steps(text in "[ -~]{1,40}", k in 0u64..500) {
        let mut cursor = CharCursor::from_text(text.clone()).unwrap();
        let size = text.len() as u64;
        for _ in 0..k {
            cursor.next();
        }
        prop_assert_eq!(cursor.total_steps(), k);
        prop_assert_eq!(cursor.epoch(), k / size);
        prop_assert_eq!(cursor.position() as u64, k % size);
    }

    #[test]
    fn prop_next_matches_text_index(text in "[ -~]{1,20}", k in 0usize..100) {
        let mut cursor = CharCursor::from_text(text.clone()).unwrap();
        for _ in 0..k {
            cursor.next();
        }
        prop_assert_eq!(cursor.next(), text.as_bytes()[k % text.len()]);
    }
}
