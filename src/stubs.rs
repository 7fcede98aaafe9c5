//! Stub learning engine for testing.
//!
//! Provides a deterministic [`LearningEngine`] without linking a real
//! sequence-learning library. Useful for unit tests, benchmarks and for
//! exercising a front end before a real engine is wired in.
//!
//! # Example
//!
//! ```
//! use chat_htm::engine::LearningEngine;
//! use chat_htm::stubs::{PredictionPolicy, StubEngine};
//! use chat_htm::Sdr;
//!
//! let mut engine = StubEngine::new(8, 1, PredictionPolicy::Always);
//! engine.set_input(&Sdr::from_acts(8, &[2, 3])).unwrap();
//! engine.step(1).unwrap();
//!
//! let snap = engine.snapshot(0);
//! assert_eq!(snap.active_column_indices, vec![2, 3]);
//! assert!(snap.column_cell_masks[2].is_predictive());
//! ```

use crate::engine::{CellMask, LearningEngine, Snapshot};
use crate::{ChatHtmError, Result, Sdr};
use std::collections::HashMap;

/// How the stub marks predictive cells after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionPolicy {
    /// No cell is ever predictive.
    Never,
    /// Every active column has a predictive cell.
    Always,
    /// First-order memory: on each step, the columns of whatever followed
    /// the previous input the last time it was seen are predictive.
    Transition,
}

/// Deterministic engine with one column per input bit.
///
/// Every layer reports the same snapshot: active columns are the active bits
/// of the last input, and predictive cells follow the [`PredictionPolicy`].
#[derive(Debug, Clone)]
pub struct StubEngine {
    input_size: usize,
    num_layers: usize,
    policy: PredictionPolicy,
    activation_threshold: usize,

    timestep: u64,
    input: Sdr,
    record_history: bool,
    history: Vec<Sdr>,
    set_input_calls: usize,
    transitions: HashMap<Vec<usize>, Vec<usize>>,
    prev_acts: Option<Vec<usize>>,
    snapshot: Snapshot,
}

impl StubEngine {
    /// Create a stub with `input_size` columns and `num_layers` layers.
    pub fn new(input_size: usize, num_layers: usize, policy: PredictionPolicy) -> Self {
        Self {
            input_size,
            num_layers,
            policy,
            activation_threshold: 0,
            timestep: 0,
            input: Sdr::new(input_size),
            record_history: true,
            history: Vec::new(),
            set_input_calls: 0,
            transitions: HashMap::new(),
            prev_acts: None,
            snapshot: Snapshot::default(),
        }
    }

    /// Value reported by `activation_threshold` for every layer.
    pub fn with_activation_threshold(mut self, threshold: usize) -> Self {
        self.activation_threshold = threshold;
        self
    }

    /// Stop keeping a copy of every input. Long runs otherwise grow without
    /// bound.
    pub fn without_history(mut self) -> Self {
        self.record_history = false;
        self
    }

    /// Every SDR passed to `set_input`, oldest first. Empty when built
    /// `without_history`.
    pub fn input_history(&self) -> &[Sdr] {
        &self.history
    }

    /// Number of `set_input` calls accepted so far.
    pub fn set_input_calls(&self) -> usize {
        self.set_input_calls
    }

    fn advance(&mut self) {
        self.timestep += 1;
        let acts = self.input.get_acts();

        // Prediction for this step comes from what followed the previous
        // input last time, looked up before recording the new transition
        let expected = self
            .prev_acts
            .as_ref()
            .and_then(|prev| self.transitions.get(prev))
            .cloned()
            .unwrap_or_default();
        if let Some(prev) = self.prev_acts.take() {
            self.transitions.insert(prev, acts.clone());
        }

        let mut masks = vec![CellMask::default(); self.input_size];
        for &col in &acts {
            masks[col].active = 1;
        }

        let predicted = match self.policy {
            PredictionPolicy::Never => Vec::new(),
            PredictionPolicy::Always => acts.clone(),
            PredictionPolicy::Transition => expected,
        };
        for col in predicted {
            masks[col].predictive = 1;
        }

        self.snapshot = Snapshot {
            timestep: self.timestep,
            active_column_indices: acts.clone(),
            column_cell_masks: masks,
        };
        self.prev_acts = Some(acts);
    }
}

impl LearningEngine for StubEngine {
    fn input_size(&self) -> usize {
        self.input_size
    }

    fn set_input(&mut self, sdr: &Sdr) -> Result<()> {
        if sdr.num_bits() != self.input_size {
            return Err(ChatHtmError::InvalidInputSize {
                expected: self.input_size,
                actual: sdr.num_bits(),
            });
        }
        self.input = sdr.clone();
        self.set_input_calls += 1;
        if self.record_history {
            self.history.push(sdr.clone());
        }
        Ok(())
    }

    fn step(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.advance();
        }
        Ok(())
    }

    fn timestep(&self) -> u64 {
        self.timestep
    }

    fn num_layers(&self) -> usize {
        self.num_layers
    }

    fn snapshot(&self, _layer: usize) -> Snapshot {
        self.snapshot.clone()
    }

    fn activation_threshold(&self, _layer: usize) -> usize {
        self.activation_threshold
    }
}
