//! CharCursor - Walks a text one byte at a time.
//!
//! # Examples
//!
//! ```
//! use chat_htm::cursor::{CharCursor, SymbolCursor};
//!
//! let mut cursor = CharCursor::from_text("ab").unwrap();
//! assert_eq!(cursor.next(), b'a');
//! assert_eq!(cursor.next(), b'b');
//!
//! // Wrapped around: one full pass completed
//! assert_eq!(cursor.epoch(), 1);
//! assert_eq!(cursor.position(), 0);
//! assert_eq!(cursor.next(), b'a');
//! ```

use super::{SymbolCursor, Walk, MEMORY_SOURCE};
use crate::{ChatHtmError, Result};
use std::path::Path;
use tracing::debug;

/// Yields the bytes of a pre-loaded text, wrapping at the end.
#[derive(Debug, Clone)]
pub struct CharCursor {
    text: Vec<u8>,
    source: String,
    walk: Walk,
}

impl CharCursor {
    /// Load the whole file at `path`.
    ///
    /// # Errors
    ///
    /// - [`ChatHtmError::CorpusUnreadable`] if the file cannot be read
    /// - [`ChatHtmError::EmptyCorpus`] if the file is empty
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read(path).map_err(|source| ChatHtmError::CorpusUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let cursor = Self::build(text, path.display().to_string())?;
        debug!(source = %cursor.source, size = cursor.size(), "loaded character corpus");
        Ok(cursor)
    }

    /// Build from in-memory text (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`ChatHtmError::EmptyCorpus`] if `text` is empty.
    pub fn from_text(text: impl Into<Vec<u8>>) -> Result<Self> {
        Self::build(text.into(), MEMORY_SOURCE.to_string())
    }

    fn build(text: Vec<u8>, source: String) -> Result<Self> {
        if text.is_empty() {
            return Err(ChatHtmError::EmptyCorpus { origin: source });
        }
        Ok(Self {
            text,
            source,
            walk: Walk::default(),
        })
    }

    /// Return the current byte and advance, wrapping at the end of the text.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u8 {
        let idx = self.walk.advance(self.text.len());
        self.text[idx]
    }

    /// Current byte, without advancing.
    pub fn peek(&self) -> u8 {
        self.text[self.walk.pos]
    }

    /// Byte `offset` positions from the current one, wrapping in both
    /// directions.
    pub fn peek_at(&self, offset: isize) -> u8 {
        self.text[self.walk.offset_index(offset, self.text.len())]
    }

    /// The full loaded text.
    pub fn text(&self) -> &[u8] {
        &self.text
    }
}

impl SymbolCursor for CharCursor {
    fn size(&self) -> usize {
        self.text.len()
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
