//! WordRowEncoder - Encodes words into row-wise SDRs, one row per letter.
//!
//! The output is a `rows x cols` grid flattened row-major. Row `r` holds the
//! letter at position `r` of the word as one block of `letter_bits` active
//! bits; the block's column depends on the letter's index in the alphabet.
//! Letters outside the alphabet share one reserved bucket after the last
//! letter. Rows beyond the word length stay zero.
//!
//! ```text
//! word "ab", rows=3, alphabet="abc", letter_bits=2  (cols = 2 * 4 = 8)
//!
//! row 0: 11 00 00 00   'a'
//! row 1: 00 11 00 00   'b'
//! row 2: 00 00 00 00   (past end of word)
//! ```
//!
//! # Examples
//!
//! ```
//! use chat_htm::encoders::{WordRowEncoder, WordRowEncoderParams};
//!
//! let enc = WordRowEncoder::new(WordRowEncoderParams {
//!     rows: 3,
//!     cols: 8,
//!     letter_bits: 2,
//!     alphabet: "abc".to_string(),
//! })
//! .unwrap();
//!
//! let sdr = enc.encode("ab");
//! assert_eq!(sdr.num_bits(), 24);
//! assert_eq!(sdr.get_acts(), vec![0, 1, 10, 11]);
//! ```

use crate::{ChatHtmError, Result, Sdr};
use serde::{Deserialize, Serialize};

/// Default alphabet: lowercase ASCII letters.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Parameters for a [`WordRowEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRowEncoderParams {
    /// Number of rows (letter positions encoded).
    pub rows: usize,
    /// Bits per row; must equal `letter_bits * (alphabet.len() + 1)`.
    pub cols: usize,
    /// Active bits per letter block.
    pub letter_bits: usize,
    /// Ordered alphabet; a letter's index picks its block.
    pub alphabet: String,
}

impl Default for WordRowEncoderParams {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 108,
            letter_bits: 4,
            alphabet: DEFAULT_ALPHABET.to_string(),
        }
    }
}

/// Encodes a word into a row-per-letter SDR of length `rows * cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct WordRowEncoder {
    params: WordRowEncoderParams,
    alphabet: Vec<char>,
    total_bits: usize, // rows * cols
}

impl WordRowEncoder {
    /// Create a new WordRowEncoder.
    ///
    /// # Errors
    ///
    /// Returns [`ChatHtmError::InvalidParameter`] if `rows`, `cols` or
    /// `letter_bits` is zero, the alphabet is empty,
    /// `cols != letter_bits * (alphabet_size + 1)`, or `rows * cols`
    /// overflows `usize`.
    pub fn new(params: WordRowEncoderParams) -> Result<Self> {
        if params.rows == 0 {
            return Err(ChatHtmError::InvalidParameter(format!(
                "WordRowEncoder: rows must be > 0 (got {})",
                params.rows
            )));
        }
        if params.cols == 0 {
            return Err(ChatHtmError::InvalidParameter(format!(
                "WordRowEncoder: cols must be > 0 (got {})",
                params.cols
            )));
        }
        if params.letter_bits == 0 {
            return Err(ChatHtmError::InvalidParameter(format!(
                "WordRowEncoder: letter_bits must be > 0 (got {})",
                params.letter_bits
            )));
        }

        let alphabet: Vec<char> = params.alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(ChatHtmError::InvalidParameter(
                "WordRowEncoder: alphabet must not be empty".to_string(),
            ));
        }

        let required_cols = params
            .letter_bits
            .checked_mul(alphabet.len() + 1)
            .ok_or_else(|| {
                ChatHtmError::InvalidParameter(format!(
                    "WordRowEncoder: letter_bits * (alphabet_size + 1) overflows (letter_bits={}, alphabet_size={})",
                    params.letter_bits,
                    alphabet.len()
                ))
            })?;
        if params.cols != required_cols {
            return Err(ChatHtmError::InvalidParameter(format!(
                "WordRowEncoder: cols must equal letter_bits * (alphabet_size + 1) = {} (got cols={})",
                required_cols, params.cols
            )));
        }

        let total_bits = params.rows.checked_mul(params.cols).ok_or_else(|| {
            ChatHtmError::InvalidParameter(format!(
                "WordRowEncoder: rows * cols overflows (rows={}, cols={})",
                params.rows, params.cols
            ))
        })?;

        Ok(Self {
            params,
            alphabet,
            total_bits,
        })
    }

    /// Encode a word. Letters past `rows` are ignored.
    pub fn encode(&self, word: &str) -> Sdr {
        let WordRowEncoderParams {
            rows,
            cols,
            letter_bits,
            ..
        } = self.params;

        let mut sdr = Sdr::new(self.total_bits);
        for (r, c) in word.chars().take(rows).enumerate() {
            let start_col = self.bucket_for_char(c) * letter_bits;
            sdr.set_range(r * cols + start_col, letter_bits);
        }
        sdr
    }

    /// Bucket index of `c` (case-insensitive); unknown letters map to
    /// `alphabet_size`.
    pub fn bucket_for_char(&self, c: char) -> usize {
        let lc = c.to_ascii_lowercase();
        self.alphabet
            .iter()
            .position(|&a| a == lc)
            .unwrap_or(self.alphabet.len())
    }

    /// Encoder parameters.
    pub fn params(&self) -> &WordRowEncoderParams {
        &self.params
    }

    /// Output SDR length (`rows * cols`).
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Number of letters in the alphabet (excluding the unknown bucket).
    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }
}
