//! Tests for WordCursor.
//!
//! Tests cover:
//! - Tokenization (ASCII letters only, lowercased)
//! - Loading from files
//! - Wraparound and context peeking

use chat_htm::cursor::word_cursor::tokenize;
use chat_htm::cursor::{SymbolCursor, WordCursor};
use chat_htm::ChatHtmError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_corpus(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_word_tokenize_punctuation_and_digits() {
    assert_eq!(
        tokenize(b"It's 2024: Rust-lang, rocks!"),
        ["it", "s", "rust", "lang", "rocks"]
    );
}

#[test]
fn test_word_from_file() {
    let file = write_corpus(b"To be, or not to be:\nthat is the question.");
    let cursor = WordCursor::from_file(file.path()).unwrap();
    assert_eq!(cursor.size(), 10);
    assert_eq!(cursor.words()[0], "to");
    assert_eq!(cursor.words()[9], "question");
}

#[test]
fn test_word_file_without_words() {
    let file = write_corpus(b"1234 ... !!!\n");
    let result = WordCursor::from_file(file.path());
    assert!(matches!(result, Err(ChatHtmError::EmptyCorpus { .. })));
}

#[test]
fn test_word_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    assert!(matches!(
        WordCursor::from_file(&path),
        Err(ChatHtmError::CorpusUnreadable { .. })
    ));
}

#[test]
fn test_word_wraps_and_counts_epochs() {
    let mut cursor = WordCursor::from_text("red green").unwrap();
    assert_eq!(cursor.next(), "red");
    assert_eq!(cursor.next(), "green");
    assert_eq!(cursor.epoch(), 1);
    assert_eq!(cursor.next(), "red");
    assert_eq!(cursor.total_steps(), 3);
    assert_eq!(cursor.position(), 1);
}

#[test]
fn test_word_current_index_and_peek_at() {
    let mut cursor = WordCursor::from_text("a b c d").unwrap();
    assert_eq!(cursor.current_index(), 3);
    cursor.next();
    cursor.next();
    assert_eq!(cursor.current_index(), 1);
    assert_eq!(cursor.peek_at(-1), "b");
    assert_eq!(cursor.peek_at(-3), "d");
    assert_eq!(cursor.peek(), "c");
}

#[test]
fn test_word_reset() {
    let mut cursor = WordCursor::from_text("one two three").unwrap();
    cursor.next();
    cursor.next();
    cursor.reset();
    assert_eq!(cursor.position(), 0);
    assert_eq!(cursor.total_steps(), 0);
    assert_eq!(cursor.next(), "one");
}
