//! Sequential symbol cursors over an in-memory corpus.
//!
//! A cursor holds an immutable corpus and walks it one symbol at a time,
//! wrapping back to the start at the end of every pass (epoch):
//!
//! - `CharCursor` - Yields raw bytes of a text
//! - `WordCursor` - Yields lowercased alphabetic words
//!
//! Both pre-load the whole corpus so repeated multi-epoch passes never touch
//! the filesystem again.

pub mod char_cursor;
pub mod word_cursor;

pub use char_cursor::CharCursor;
pub use word_cursor::WordCursor;

/// Source label used for corpora built from in-memory text.
pub const MEMORY_SOURCE: &str = "<memory>";

/// Position bookkeeping shared by every cursor type.
pub trait SymbolCursor {
    /// Number of symbols in the corpus (always > 0).
    fn size(&self) -> usize;

    /// Index of the next symbol `next()` will return.
    fn position(&self) -> usize;

    /// Completed passes through the corpus.
    fn epoch(&self) -> u64;

    /// Symbols yielded since construction or the last `reset()`.
    fn total_steps(&self) -> u64;

    /// File path the corpus was loaded from, or `<memory>`.
    fn source(&self) -> &str;

    /// Rewind to the first symbol and zero the counters.
    fn reset(&mut self);

    /// Index of the most recently yielded symbol.
    ///
    /// Before any `next()` call this is the last index of the corpus.
    fn current_index(&self) -> usize {
        match self.position() {
            0 => self.size() - 1,
            pos => pos - 1,
        }
    }
}

/// Mutable walk state: position, epoch and lifetime step count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Walk {
    pub(crate) pos: usize,
    pub(crate) epoch: u64,
    pub(crate) total_steps: u64,
}

impl Walk {
    /// Move past the current symbol of a corpus with `size` symbols.
    ///
    /// Returns the index of the symbol that was current before advancing.
    #[inline]
    pub(crate) fn advance(&mut self, size: usize) -> usize {
        let idx = self.pos;
        self.pos += 1;
        self.total_steps += 1;
        if self.pos >= size {
            self.pos = 0;
            self.epoch += 1;
        }
        idx
    }

    /// Index `offset` symbols away from the current position, wrapping in
    /// both directions.
    #[inline]
    pub(crate) fn offset_index(&self, offset: isize, size: usize) -> usize {
        let step = offset.rem_euclid(size as isize) as usize;
        (self.pos + step) % size
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
