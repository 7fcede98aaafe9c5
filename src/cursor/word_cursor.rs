//! WordCursor - Walks a text one normalized word at a time.
//!
//! Words are maximal runs of ASCII letters, lowercased. Everything else
//! (digits, punctuation, whitespace, non-ASCII bytes) separates words and is
//! discarded. Tokenization happens once, at construction.
//!
//! # Examples
//!
//! ```
//! use chat_htm::cursor::{SymbolCursor, WordCursor};
//!
//! let mut cursor = WordCursor::from_text("Hello, World! 42 times").unwrap();
//! assert_eq!(cursor.words().to_vec(), vec!["hello", "world", "times"]);
//! assert_eq!(cursor.next(), "hello");
//! assert_eq!(cursor.peek(), "world");
//! ```

use super::{SymbolCursor, Walk, MEMORY_SOURCE};
use crate::{ChatHtmError, Result};
use std::path::Path;
use tracing::debug;

/// Yields the words of a pre-tokenized text, wrapping at the end.
#[derive(Debug, Clone)]
pub struct WordCursor {
    words: Vec<String>,
    source: String,
    walk: Walk,
}

impl WordCursor {
    /// Load and tokenize the whole file at `path`.
    ///
    /// # Errors
    ///
    /// - [`ChatHtmError::CorpusUnreadable`] if the file cannot be read
    /// - [`ChatHtmError::EmptyCorpus`] if the file contains no words
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|source| ChatHtmError::CorpusUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let cursor = Self::build(&content, path.display().to_string())?;
        debug!(source = %cursor.source, size = cursor.size(), "loaded word corpus");
        Ok(cursor)
    }

    /// Build from in-memory text (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`ChatHtmError::EmptyCorpus`] if `text` contains no words.
    pub fn from_text(text: impl AsRef<[u8]>) -> Result<Self> {
        Self::build(text.as_ref(), MEMORY_SOURCE.to_string())
    }

    fn build(content: &[u8], source: String) -> Result<Self> {
        let words = tokenize(content);
        if words.is_empty() {
            return Err(ChatHtmError::EmptyCorpus { origin: source });
        }
        Ok(Self {
            words,
            source,
            walk: Walk::default(),
        })
    }

    /// Return the current word and advance, wrapping at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &str {
        let idx = self.walk.advance(self.words.len());
        &self.words[idx]
    }

    /// Current word, without advancing.
    pub fn peek(&self) -> &str {
        &self.words[self.walk.pos]
    }

    /// Word `offset` positions from the current one, wrapping in both
    /// directions.
    pub fn peek_at(&self, offset: isize) -> &str {
        &self.words[self.walk.offset_index(offset, self.words.len())]
    }

    /// All words of the corpus, in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl SymbolCursor for WordCursor {
    fn size(&self) -> usize {
        self.words.len()
    }

    fn position(&self) -> usize {
        self.walk.pos
    }

    fn epoch(&self) -> u64 {
        self.walk.epoch
    }

    fn total_steps(&self) -> u64 {
        self.walk.total_steps
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn reset(&mut self) {
        self.walk.reset();
    }
}

/// Split `content` into lowercased runs of ASCII letters.
pub fn tokenize(content: &[u8]) -> Vec<String> {
    content
        .split(|b| !b.is_ascii_alphabetic())
        .filter(|run| !run.is_empty())
        .map(|run| run.iter().map(|b| char::from(b.to_ascii_lowercase())).collect())
        .collect()
}
