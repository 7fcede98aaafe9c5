//! Learning engine interface.
//!
//! The sequence-learning engine (spatial pooling, sequence memory, synapse
//! updates) lives outside this crate. The runtime only needs to hand it an
//! SDR, advance it, and read back a per-layer view of which columns are
//! active and which cells are predicting. `LearningEngine` is that seam.
//!
//! The introspection types below are plain data with `serde` support so that
//! a debugger front end can ship them elsewhere unchanged.

use crate::{Result, Sdr};
use serde::{Deserialize, Serialize};

/// Per-column cell state bitmasks. Bit `i` describes cell `i` of the column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMask {
    /// Cells that are currently active.
    pub active: u64,
    /// Cells that are predicting activity on the next timestep.
    pub predictive: u64,
}

impl CellMask {
    /// True when any cell of the column is predictive.
    #[inline]
    pub fn is_predictive(&self) -> bool {
        self.predictive != 0
    }
}

/// Read-only view of one layer after the most recent `step`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Engine timestep this view was taken at.
    pub timestep: u64,
    /// Indices of active columns.
    pub active_column_indices: Vec<usize>,
    /// One mask per column, indexed by column.
    pub column_cell_masks: Vec<CellMask>,
}

/// One proximal synapse of a column, as seen by a debugger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximalSynapse {
    pub input_x: usize,
    pub input_y: usize,
    pub permanence: f32,
    pub connected: bool,
}

/// Proximal synapses of one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProximalSynapseQuery {
    pub column_x: usize,
    pub column_y: usize,
    pub synapses: Vec<ProximalSynapse>,
}

/// One distal synapse of a segment, pointing at a presynaptic cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistalSynapse {
    pub source_column_x: usize,
    pub source_column_y: usize,
    pub source_cell: usize,
    pub permanence: f32,
    pub connected: bool,
}

/// Distal synapses of one segment of one cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistalSynapseQuery {
    pub column_x: usize,
    pub column_y: usize,
    pub cell: usize,
    pub segment: usize,
    pub synapses: Vec<DistalSynapse>,
}

/// A selectable entry in a front end's picker (layers, input sources).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSequence {
    pub id: usize,
    pub name: String,
}

/// A multi-layer sequence-learning engine driven one timestep at a time.
///
/// Layer indices passed to the introspection methods are always
/// `< num_layers()`; callers check before forwarding.
pub trait LearningEngine {
    /// Declared input dimension; every SDR passed to `set_input` has this length.
    fn input_size(&self) -> usize;

    /// Replace the engine's current input.
    fn set_input(&mut self, sdr: &Sdr) -> Result<()>;

    /// Advance internal state by `count` timesteps.
    fn step(&mut self, count: usize) -> Result<()>;

    /// Timesteps processed so far. Monotonically increasing.
    fn timestep(&self) -> u64;

    /// Number of layers; valid layer indices are `0..num_layers()`.
    fn num_layers(&self) -> usize;

    /// State of `layer` as of the most recent `step`.
    fn snapshot(&self, layer: usize) -> Snapshot;

    /// Proximal synapses of the column at (`column_x`, `column_y`).
    fn query_proximal(&self, _layer: usize, column_x: usize, column_y: usize) -> ProximalSynapseQuery {
        ProximalSynapseQuery {
            column_x,
            column_y,
            synapses: Vec::new(),
        }
    }

    /// Number of distal segments on one cell.
    fn num_segments(&self, _layer: usize, _column_x: usize, _column_y: usize, _cell: usize) -> usize {
        0
    }

    /// Distal synapses of one segment.
    fn query_distal(
        &self,
        _layer: usize,
        column_x: usize,
        column_y: usize,
        cell: usize,
        segment: usize,
    ) -> DistalSynapseQuery {
        DistalSynapseQuery {
            column_x,
            column_y,
            cell,
            segment,
            synapses: Vec::new(),
        }
    }

    /// Active-synapse count a distal segment needs to become active.
    fn activation_threshold(&self, _layer: usize) -> usize {
        0
    }
}
