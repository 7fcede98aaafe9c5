//! chat_htm - Text Input Runtime for Sequence-Learning Engines
//!
//! chat_htm feeds a text corpus, one symbol per timestep, into a multi-layer
//! sequence-learning engine and measures how well the engine predicts the
//! next symbol. Symbols are turned into **Sparse Distributed Representations**
//! (SDRs): fixed-length binary vectors with a small number of active bits.
//!
//! # Architecture
//!
//! - **Sdr**: Fixed-length bit vector exchanged with the engine
//! - **Encoders**: `ScalarEncoder` (characters) and `WordRowEncoder` (words)
//! - **Cursors**: `CharCursor` and `WordCursor` walk a pre-loaded corpus and
//!   wrap around at the end of each epoch
//! - **LearningEngine**: Trait seam to the external engine
//! - **TextRuntime**: Drives the engine and scores its predictions
//! - **TextConfig**: JSON description of a runtime's input side
//!
//! # Example
//!
//! ```
//! use chat_htm::cursor::WordCursor;
//! use chat_htm::encoders::{WordRowEncoder, WordRowEncoderParams};
//! use chat_htm::stubs::{PredictionPolicy, StubEngine};
//! use chat_htm::TextRuntime;
//!
//! let encoder = WordRowEncoder::new(WordRowEncoderParams::default()).unwrap();
//! let cursor = WordCursor::from_text("the cat sat on the mat").unwrap();
//! let engine = StubEngine::new(encoder.total_bits(), 2, PredictionPolicy::Transition);
//!
//! let mut rt = TextRuntime::with_word_input(engine, cursor, encoder, "cats").unwrap();
//! let summary = rt.run(60).unwrap();
//!
//! assert_eq!(summary.epoch, 10);
//! assert!(summary.accuracy > 0.5);
//! assert_eq!(rt.name(), "cats (Layer 0/2)");
//! ```
//!
//! # Logging
//!
//! The crate logs through `tracing` and never installs a subscriber. Per-step
//! trace lines use the `chat_htm::text` target and are off unless enabled
//! with [`TextRuntime::set_log_text`].

pub mod config;
pub mod cursor;
pub mod encoders;
pub mod engine;
pub mod error;
pub mod runtime;
pub mod sdr;
pub mod stubs;

// Re-exports for convenient access
pub use config::TextConfig;
pub use cursor::{CharCursor, SymbolCursor, WordCursor};
pub use encoders::{ScalarEncoder, ScalarEncoderParams, WordRowEncoder, WordRowEncoderParams};
pub use engine::{LearningEngine, Snapshot};
pub use error::{ChatHtmError, Result};
pub use runtime::{InputMode, InputPipeline, RunSummary, TextRuntime};
pub use sdr::Sdr;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "chat_htm";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
