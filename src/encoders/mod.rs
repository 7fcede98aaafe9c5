//! Symbol encoders.
//!
//! Encoders turn one input symbol into a Sparse Distributed Representation
//! (SDR) of a fixed length:
//!
//! - `ScalarEncoder` - Encodes bounded integers (character codes) with
//!   overlapping sliding windows
//! - `WordRowEncoder` - Encodes words as one letter block per row
//!
//! Both are pure: the same symbol always yields the same SDR.

pub mod scalar_encoder;
pub mod word_row_encoder;

pub use scalar_encoder::{ScalarEncoder, ScalarEncoderParams};
pub use word_row_encoder::{WordRowEncoder, WordRowEncoderParams, DEFAULT_ALPHABET};
