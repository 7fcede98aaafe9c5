//! Runtime configuration documents.
//!
//! A [`TextConfig`] describes everything needed to turn a corpus path into an
//! [`InputPipeline`]: which input mode to use, the engine's input grid, and
//! any encoder parameters that differ from the defaults. It is stored as
//! JSON.
//!
//! # Example
//!
//! ```
//! use chat_htm::config::TextConfig;
//! use chat_htm::runtime::InputMode;
//!
//! let config = TextConfig::from_json_str(
//!     r#"{
//!         "mode": "word_rows",
//!         "input": { "rows": 3, "cols": 108 },
//!         "encoder": { "letter_bits": 4 }
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.mode, InputMode::WordRows);
//! assert_eq!(config.input_bits().unwrap(), 324);
//! assert_eq!(config.word_row_params().rows, 3);
//! ```

use crate::cursor::{CharCursor, WordCursor};
use crate::encoders::{ScalarEncoder, ScalarEncoderParams, WordRowEncoder, WordRowEncoderParams};
use crate::runtime::{InputMode, InputPipeline};
use crate::{ChatHtmError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Shape of the engine's layer-0 input; the SDR length is `rows * cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputGrid {
    pub rows: usize,
    pub cols: usize,
}

/// Encoder overrides. Unset fields fall back to the encoder defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Scalar encoder `w`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_bits: Option<usize>,

    /// Scalar encoder lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,

    /// Scalar encoder upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,

    /// Word row encoder block width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_bits: Option<usize>,

    /// Word row encoder alphabet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<String>,
}

/// Complete text runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Character or word-row input
    #[serde(default)]
    pub mode: InputMode,

    /// Engine input grid; when absent, the mode's default encoder size is used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputGrid>,

    #[serde(default)]
    pub encoder: EncoderConfig,
}

impl TextConfig {
    /// Deserialize from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and deserialize a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Length of the SDRs the engine expects.
    ///
    /// # Errors
    ///
    /// Returns [`ChatHtmError::InvalidParameter`] if `rows * cols`
    /// overflows `usize`.
    pub fn input_bits(&self) -> Result<usize> {
        match (self.input, self.mode) {
            (Some(grid), _) => grid.rows.checked_mul(grid.cols).ok_or_else(|| {
                ChatHtmError::InvalidParameter(format!(
                    "TextConfig: input rows * cols overflows (rows={}, cols={})",
                    grid.rows, grid.cols
                ))
            }),
            (None, InputMode::Character) => Ok(ScalarEncoderParams::default().n),
            (None, InputMode::WordRows) => {
                let defaults = WordRowEncoderParams::default();
                Ok(defaults.rows * defaults.cols)
            }
        }
    }

    /// Scalar encoder parameters sized to the whole input grid.
    pub fn scalar_params(&self) -> Result<ScalarEncoderParams> {
        let defaults = ScalarEncoderParams::default();
        Ok(ScalarEncoderParams {
            n: self.input_bits()?,
            w: self.encoder.active_bits.unwrap_or(defaults.w),
            min_val: self.encoder.min_value.unwrap_or(defaults.min_val),
            max_val: self.encoder.max_value.unwrap_or(defaults.max_val),
        })
    }

    /// Word row encoder parameters, one encoder row per grid row.
    pub fn word_row_params(&self) -> WordRowEncoderParams {
        let defaults = WordRowEncoderParams::default();
        let (rows, cols) = match self.input {
            Some(grid) => (grid.rows, grid.cols),
            None => (defaults.rows, defaults.cols),
        };
        WordRowEncoderParams {
            rows,
            cols,
            letter_bits: self.encoder.letter_bits.unwrap_or(defaults.letter_bits),
            alphabet: self
                .encoder
                .alphabet
                .clone()
                .unwrap_or(defaults.alphabet),
        }
    }

    /// Load the corpus at `path` and build the cursor and encoder for the
    /// configured mode.
    ///
    /// # Errors
    ///
    /// Returns the encoder's validation error or the cursor's load error.
    pub fn build_pipeline(&self, path: impl AsRef<Path>) -> Result<InputPipeline> {
        let path = path.as_ref();
        debug!(mode = %self.mode, path = %path.display(), "building input pipeline");
        match self.mode {
            InputMode::Character => Ok(InputPipeline::Character {
                encoder: ScalarEncoder::new(self.scalar_params()?)?,
                cursor: CharCursor::from_file(path)?,
            }),
            InputMode::WordRows => Ok(InputPipeline::WordRows {
                encoder: WordRowEncoder::new(self.word_row_params())?,
                cursor: WordCursor::from_file(path)?,
            }),
        }
    }

    /// Like [`build_pipeline`](Self::build_pipeline), over in-memory text.
    pub fn build_pipeline_from_text(&self, text: &str) -> Result<InputPipeline> {
        match self.mode {
            InputMode::Character => Ok(InputPipeline::Character {
                encoder: ScalarEncoder::new(self.scalar_params()?)?,
                cursor: CharCursor::from_text(text)?,
            }),
            InputMode::WordRows => Ok(InputPipeline::WordRows {
                encoder: WordRowEncoder::new(self.word_row_params())?,
                cursor: WordCursor::from_text(text)?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TextConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TextConfig::default());
        assert_eq!(config.mode, InputMode::Character);
        assert_eq!(config.scalar_params().unwrap(), ScalarEncoderParams::default());
    }

    #[test]
    fn test_scalar_params_follow_grid() {
        let config = TextConfig {
            input: Some(InputGrid { rows: 2, cols: 15 }),
            encoder: EncoderConfig {
                active_bits: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };
        let params = config.scalar_params().unwrap();
        assert_eq!(params.n, 30);
        assert_eq!(params.w, 3);
        assert_eq!(params.max_val, 127);
    }

    #[test]
    fn test_json_roundtrip_omits_unset_fields() {
        let config = TextConfig {
            mode: InputMode::WordRows,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"word_rows\""));
        assert!(!json.contains("alphabet"));
        assert_eq!(TextConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_unknown_mode_is_config_error() {
        let err = TextConfig::from_json_str(r#"{"mode": "pixels"}"#).unwrap_err();
        assert!(matches!(err, ChatHtmError::Config(_)));
    }

    #[test]
    fn test_pipeline_rejects_bad_word_grid() {
        let config = TextConfig {
            mode: InputMode::WordRows,
            input: Some(InputGrid { rows: 5, cols: 100 }),
            ..Default::default()
        };
        assert!(matches!(
            config.build_pipeline_from_text("hello"),
            Err(ChatHtmError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let config = TextConfig {
            input: Some(InputGrid {
                rows: usize::MAX / 2,
                cols: 3,
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.input_bits(),
            Err(ChatHtmError::InvalidParameter(_))
        ));
        assert!(matches!(
            config.build_pipeline_from_text("abc"),
            Err(ChatHtmError::InvalidParameter(_))
        ));
    }
}
