//! TextRuntime - Feeds a text corpus to a learning engine one symbol per step.
//!
//! The runtime owns an [`InputPipeline`] (a cursor plus its matching encoder)
//! and a [`LearningEngine`]. Each step:
//!
//! 1. **Score** - before touching the input, read layer 0's snapshot from the
//!    previous step and count whether most active columns were predicted
//! 2. **Consume** - pull the next symbol, encode it, hand the SDR to the
//!    engine and advance it by one timestep
//! 3. **Trace** - if enabled, log one line with the step, epoch, running
//!    accuracy and the text around the consumed symbol
//!
//! Scoring must run before consuming: the snapshot it reads is the engine's
//! state after step k-1 and before step k's input is applied.
//!
//! # Examples
//!
//! ```
//! use chat_htm::cursor::CharCursor;
//! use chat_htm::encoders::{ScalarEncoder, ScalarEncoderParams};
//! use chat_htm::engine::LearningEngine;
//! use chat_htm::stubs::{PredictionPolicy, StubEngine};
//! use chat_htm::TextRuntime;
//!
//! let encoder = ScalarEncoder::new(ScalarEncoderParams {
//!     n: 30,
//!     w: 3,
//!     min_val: 0,
//!     max_val: 127,
//! })
//! .unwrap();
//! let cursor = CharCursor::from_text("abc").unwrap();
//! let engine = StubEngine::new(30, 1, PredictionPolicy::Always);
//!
//! let mut rt = TextRuntime::with_char_input(engine, cursor, encoder, "demo").unwrap();
//! rt.step(9).unwrap();
//!
//! assert_eq!(rt.engine().timestep(), 9);
//! assert_eq!(rt.engine().set_input_calls(), 9);
//! assert_eq!(rt.input_epoch(), 3);
//! ```

use crate::cursor::{CharCursor, SymbolCursor, WordCursor};
use crate::encoders::{ScalarEncoder, WordRowEncoder};
use crate::engine::{
    DistalSynapseQuery, InputSequence, LearningEngine, ProximalSynapseQuery, Snapshot,
};
use crate::{ChatHtmError, Result, Sdr};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Characters shown on each side of the current one in character mode.
pub const CHAR_CONTEXT: isize = 10;

/// Words shown on each side of the current one in word mode.
pub const WORD_CONTEXT: isize = 4;

/// Target for per-step trace lines.
pub const TRACE_TARGET: &str = "chat_htm::text";

/// Which kind of symbol the runtime feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// One byte per step, scalar-window encoded
    #[default]
    Character,
    /// One word per step, row-per-letter encoded
    WordRows,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Character => f.write_str("character"),
            InputMode::WordRows => f.write_str("word_rows"),
        }
    }
}

/// A symbol that was fed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Char(u8),
    Word(String),
}

/// A cursor paired with the encoder for its symbol type.
#[derive(Debug, Clone)]
pub enum InputPipeline {
    Character {
        cursor: CharCursor,
        encoder: ScalarEncoder,
    },
    WordRows {
        cursor: WordCursor,
        encoder: WordRowEncoder,
    },
}

impl InputPipeline {
    /// Input mode of this pipeline.
    pub fn mode(&self) -> InputMode {
        match self {
            InputPipeline::Character { .. } => InputMode::Character,
            InputPipeline::WordRows { .. } => InputMode::WordRows,
        }
    }

    /// Length of the SDRs this pipeline produces.
    pub fn encoded_bits(&self) -> usize {
        match self {
            InputPipeline::Character { encoder, .. } => encoder.total_bits(),
            InputPipeline::WordRows { encoder, .. } => encoder.total_bits(),
        }
    }

    /// The cursor, viewed through its position bookkeeping.
    pub fn cursor(&self) -> &dyn SymbolCursor {
        match self {
            InputPipeline::Character { cursor, .. } => cursor,
            InputPipeline::WordRows { cursor, .. } => cursor,
        }
    }

    /// Mutable cursor access, e.g. to `reset()` between runs.
    pub fn cursor_mut(&mut self) -> &mut dyn SymbolCursor {
        match self {
            InputPipeline::Character { cursor, .. } => cursor,
            InputPipeline::WordRows { cursor, .. } => cursor,
        }
    }

    /// Pull the next symbol and encode it.
    fn advance(&mut self) -> (Symbol, Sdr) {
        match self {
            InputPipeline::Character { cursor, encoder } => {
                let c = cursor.next();
                (Symbol::Char(c), encoder.encode(i64::from(c)))
            }
            InputPipeline::WordRows { cursor, encoder } => {
                let word = cursor.next();
                let sdr = encoder.encode(word);
                (Symbol::Word(word.to_string()), sdr)
            }
        }
    }

    /// Text around the most recently consumed symbol, with it bracketed.
    ///
    /// Character mode shows ±10 characters, word mode ±4 words.
    pub fn context(&self) -> String {
        // peek_at is relative to the next symbol; the consumed one is at -1
        match self {
            InputPipeline::Character { cursor, .. } => (-CHAR_CONTEXT..=CHAR_CONTEXT)
                .map(|j| {
                    let c = printable(cursor.peek_at(j - 1));
                    if j == 0 {
                        format!("[{}]", c)
                    } else {
                        c.to_string()
                    }
                })
                .collect(),
            InputPipeline::WordRows { cursor, .. } => (-WORD_CONTEXT..=WORD_CONTEXT)
                .map(|j| {
                    let word = cursor.peek_at(j - 1);
                    if j == 0 {
                        format!("[{}]", word)
                    } else {
                        word.to_string()
                    }
                })
                .join(" "),
        }
    }
}

/// Render a byte for a one-line trace: whitespace controls become a space,
/// anything else outside printable ASCII becomes a dot.
pub fn printable(c: u8) -> char {
    match c {
        b'\n' | b'\r' | b'\t' => ' ',
        32..=126 => char::from(c),
        _ => '.',
    }
}

/// Outcome of a headless [`TextRuntime::run`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Steps executed by this run.
    pub steps: u64,
    /// Cursor epoch at the end of the run.
    pub epoch: u64,
    /// Cumulative prediction accuracy at the end of the run.
    pub accuracy: f64,
}

/// Drives a [`LearningEngine`] with encoded text and tracks prediction accuracy.
///
/// The runtime exclusively owns its engine, cursor and encoder. Prediction
/// counters are per instance; two runtimes never share them.
pub struct TextRuntime<E: LearningEngine> {
    engine: E,
    pipeline: InputPipeline,
    name: String,
    active_layer: usize,
    log_text: bool,

    last_symbol: Option<Symbol>,
    correct_predictions: u64,
    total_predictions: u64,
}

impl<E: LearningEngine> TextRuntime<E> {
    /// Create a runtime over a fully configured engine.
    ///
    /// # Errors
    ///
    /// Returns [`ChatHtmError::InvalidInputSize`] if the pipeline's SDR
    /// length differs from the engine's input size.
    pub fn new(engine: E, pipeline: InputPipeline, name: impl Into<String>) -> Result<Self> {
        let expected = engine.input_size();
        let actual = pipeline.encoded_bits();
        if expected != actual {
            return Err(ChatHtmError::InvalidInputSize { expected, actual });
        }

        let name = name.into();
        debug!(
            name = %name,
            mode = %pipeline.mode(),
            input_bits = actual,
            corpus = pipeline.cursor().size(),
            layers = engine.num_layers(),
            "created text runtime"
        );

        Ok(Self {
            engine,
            pipeline,
            name,
            active_layer: 0,
            log_text: false,
            last_symbol: None,
            correct_predictions: 0,
            total_predictions: 0,
        })
    }

    /// Character-mode runtime.
    pub fn with_char_input(
        engine: E,
        cursor: CharCursor,
        encoder: ScalarEncoder,
        name: impl Into<String>,
    ) -> Result<Self> {
        Self::new(engine, InputPipeline::Character { cursor, encoder }, name)
    }

    /// Word-row-mode runtime.
    pub fn with_word_input(
        engine: E,
        cursor: WordCursor,
        encoder: WordRowEncoder,
        name: impl Into<String>,
    ) -> Result<Self> {
        Self::new(engine, InputPipeline::WordRows { cursor, encoder }, name)
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Feed `n` symbols, one engine timestep each. `n == 0` does nothing.
    ///
    /// # Errors
    ///
    /// Engine errors are returned unchanged. Symbols already consumed and
    /// counters already updated by earlier iterations are kept.
    pub fn step(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.score_prediction();
            self.consume()?;
            if self.log_text {
                info!(target: TRACE_TARGET, "{}", self.trace_line());
            }
        }
        Ok(())
    }

    /// Score the engine's previous prediction against layer 0's snapshot.
    fn score_prediction(&mut self) {
        if self.total_predictions == 0 && self.engine.timestep() == 0 {
            return;
        }
        if self.engine.num_layers() == 0 {
            return;
        }

        let snap = self.engine.snapshot(0);
        let mut total_active = 0usize;
        let mut predicted_and_active = 0usize;
        for &idx in &snap.active_column_indices {
            if let Some(mask) = snap.column_cell_masks.get(idx) {
                total_active += 1;
                if mask.is_predictive() {
                    predicted_and_active += 1;
                }
            }
        }

        if total_active > 0 {
            if predicted_and_active > total_active / 2 {
                self.correct_predictions += 1;
            }
            self.total_predictions += 1;
        }
    }

    /// Encode the next symbol and advance the engine by one timestep.
    fn consume(&mut self) -> Result<()> {
        let (symbol, sdr) = self.pipeline.advance();
        self.last_symbol = Some(symbol);
        self.engine.set_input(&sdr)?;
        self.engine.step(1)
    }

    /// Number of steps a run should take: `steps` when given, otherwise
    /// `epochs` full passes over the corpus.
    pub fn plan_steps(&self, steps: Option<u64>, epochs: u64) -> u64 {
        steps.unwrap_or(self.input_size() as u64 * epochs)
    }

    /// Step `total_steps` times, logging progress about 20 times.
    pub fn run(&mut self, total_steps: u64) -> Result<RunSummary> {
        let log_interval = (total_steps / 20).max(1);
        for i in 0..total_steps {
            self.step(1)?;
            if i % log_interval == 0 || i + 1 == total_steps {
                debug!(
                    step = i + 1,
                    total = total_steps,
                    epoch = self.input_epoch(),
                    accuracy = self.prediction_accuracy(),
                    context = %self.input_context(),
                    "progress"
                );
            }
        }

        let summary = RunSummary {
            steps: total_steps,
            epoch: self.input_epoch(),
            accuracy: self.prediction_accuracy(),
        };
        info!(
            name = %self.name,
            steps = summary.steps,
            epoch = summary.epoch,
            accuracy = summary.accuracy,
            "run finished"
        );
        Ok(summary)
    }

    // =========================================================================
    // Accuracy and tracing
    // =========================================================================

    /// Fraction of scored steps where most active columns were predicted.
    ///
    /// 0.0 before any step has been scored.
    pub fn prediction_accuracy(&self) -> f64 {
        if self.total_predictions == 0 {
            return 0.0;
        }
        self.correct_predictions as f64 / self.total_predictions as f64
    }

    /// Steps whose prediction was judged correct.
    pub fn correct_predictions(&self) -> u64 {
        self.correct_predictions
    }

    /// Steps that were scored.
    pub fn total_predictions(&self) -> u64 {
        self.total_predictions
    }

    /// Enable or disable the per-step trace line.
    pub fn set_log_text(&mut self, enabled: bool) {
        self.log_text = enabled;
    }

    pub fn log_text(&self) -> bool {
        self.log_text
    }

    /// The trace line for the current state, as logged after each step.
    pub fn trace_line(&self) -> String {
        format!(
            "[text] step={}  epoch={}  accuracy={:.1}%  | {}",
            self.engine.timestep(),
            self.input_epoch(),
            self.prediction_accuracy() * 100.0,
            self.input_context()
        )
    }

    // =========================================================================
    // Introspection (forwarded to the active layer)
    // =========================================================================

    fn active_layer_valid(&self) -> bool {
        self.active_layer < self.engine.num_layers()
    }

    /// Snapshot of the active layer, or an empty one without a valid layer.
    pub fn snapshot(&self) -> Snapshot {
        if !self.active_layer_valid() {
            return Snapshot::default();
        }
        self.engine.snapshot(self.active_layer)
    }

    pub fn query_proximal(&self, column_x: usize, column_y: usize) -> ProximalSynapseQuery {
        if !self.active_layer_valid() {
            return ProximalSynapseQuery::default();
        }
        self.engine
            .query_proximal(self.active_layer, column_x, column_y)
    }

    pub fn num_segments(&self, column_x: usize, column_y: usize, cell: usize) -> usize {
        if !self.active_layer_valid() {
            return 0;
        }
        self.engine
            .num_segments(self.active_layer, column_x, column_y, cell)
    }

    pub fn query_distal(
        &self,
        column_x: usize,
        column_y: usize,
        cell: usize,
        segment: usize,
    ) -> DistalSynapseQuery {
        if !self.active_layer_valid() {
            return DistalSynapseQuery::default();
        }
        self.engine
            .query_distal(self.active_layer, column_x, column_y, cell, segment)
    }

    pub fn activation_threshold(&self) -> usize {
        if !self.active_layer_valid() {
            return 0;
        }
        self.engine.activation_threshold(self.active_layer)
    }

    /// Input sources a front end can choose from; always the one corpus.
    pub fn input_sequences(&self) -> Vec<InputSequence> {
        vec![InputSequence {
            id: 0,
            name: format!("Text: {}", self.pipeline.cursor().source()),
        }]
    }

    pub fn input_sequence(&self) -> usize {
        0
    }

    /// Only one input source exists, so selection is ignored.
    pub fn set_input_sequence(&mut self, _id: usize) {}

    /// Display name with the active layer, e.g. `"small (Layer 0/2)"`.
    pub fn name(&self) -> String {
        format!(
            "{} (Layer {}/{})",
            self.name,
            self.active_layer,
            self.num_layers()
        )
    }

    // =========================================================================
    // Layer selection
    // =========================================================================

    /// One `"Layer i"` entry per engine layer.
    pub fn layer_options(&self) -> Vec<InputSequence> {
        (0..self.num_layers())
            .map(|i| InputSequence {
                id: i,
                name: format!("Layer {}", i),
            })
            .collect()
    }

    pub fn num_layers(&self) -> usize {
        self.engine.num_layers()
    }

    pub fn active_layer(&self) -> usize {
        self.active_layer
    }

    /// Select the layer for introspection. Out-of-range indices are ignored.
    pub fn set_active_layer(&mut self, idx: usize) {
        if idx < self.num_layers() {
            self.active_layer = idx;
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn pipeline(&self) -> &InputPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut InputPipeline {
        &mut self.pipeline
    }

    pub fn char_cursor(&self) -> Option<&CharCursor> {
        match &self.pipeline {
            InputPipeline::Character { cursor, .. } => Some(cursor),
            InputPipeline::WordRows { .. } => None,
        }
    }

    pub fn word_cursor(&self) -> Option<&WordCursor> {
        match &self.pipeline {
            InputPipeline::WordRows { cursor, .. } => Some(cursor),
            InputPipeline::Character { .. } => None,
        }
    }

    pub fn scalar_encoder(&self) -> Option<&ScalarEncoder> {
        match &self.pipeline {
            InputPipeline::Character { encoder, .. } => Some(encoder),
            InputPipeline::WordRows { .. } => None,
        }
    }

    pub fn word_encoder(&self) -> Option<&WordRowEncoder> {
        match &self.pipeline {
            InputPipeline::WordRows { encoder, .. } => Some(encoder),
            InputPipeline::Character { .. } => None,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.pipeline.mode()
    }

    /// Symbols in the corpus (characters or words).
    pub fn input_size(&self) -> usize {
        self.pipeline.cursor().size()
    }

    pub fn input_epoch(&self) -> u64 {
        self.pipeline.cursor().epoch()
    }

    pub fn input_total_steps(&self) -> u64 {
        self.pipeline.cursor().total_steps()
    }

    /// Context string shown in trace lines.
    pub fn input_context(&self) -> String {
        self.pipeline.context()
    }

    /// The most recently consumed symbol, if any.
    pub fn last_symbol(&self) -> Option<&Symbol> {
        self.last_symbol.as_ref()
    }

    /// The byte most recently fed, in character mode.
    pub fn last_char(&self) -> Option<u8> {
        match self.last_symbol {
            Some(Symbol::Char(c)) => Some(c),
            _ => None,
        }
    }

    /// The word most recently fed, in word mode.
    pub fn last_word(&self) -> Option<&str> {
        match &self.last_symbol {
            Some(Symbol::Word(w)) => Some(w),
            _ => None,
        }
    }
}
