//! ScalarEncoder - Encodes bounded integers into sliding-window SDRs.
//!
//! A value in `[min_val, max_val]` maps to a binary vector of `n` bits with
//! exactly `w` contiguous active bits. As the value increases the window
//! slides from left to right, so nearby values share most of their bits.
//!
//! # Semantic Properties
//!
//! - **Overlapping Representations**: adjacent values overlap by `w` minus the
//!   bucket step between them
//! - **Fixed Sparsity**: every encoding has exactly `w` active bits
//! - **Silent Clamping**: out-of-range values encode as the nearest bound
//!
//! # Examples
//!
//! ```
//! use chat_htm::encoders::{ScalarEncoder, ScalarEncoderParams};
//!
//! // n=20, w=5, range 0-9:
//! //   encode(0) -> 11111 00000 00000 00000
//! //   encode(9) -> 00000 00000 00000 11111
//! let enc = ScalarEncoder::new(ScalarEncoderParams {
//!     n: 20,
//!     w: 5,
//!     min_val: 0,
//!     max_val: 9,
//! })
//! .unwrap();
//!
//! assert_eq!(enc.encode(0).get_acts(), vec![0, 1, 2, 3, 4]);
//! assert_eq!(enc.encode(9).get_acts(), vec![15, 16, 17, 18, 19]);
//! assert_eq!(enc.overlap(4, 5), 4);
//! ```

use crate::{ChatHtmError, Result, Sdr};
use serde::{Deserialize, Serialize};

/// Parameters for a [`ScalarEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarEncoderParams {
    /// Total number of bits in the output SDR.
    pub n: usize,
    /// Number of active (1) bits per encoding.
    pub w: usize,
    /// Minimum input value (inclusive).
    pub min_val: i64,
    /// Maximum input value (inclusive).
    pub max_val: i64,
}

impl Default for ScalarEncoderParams {
    fn default() -> Self {
        Self {
            n: 400,
            w: 21,
            min_val: 0,
            max_val: 127,
        }
    }
}

/// Encodes a bounded integer into an SDR with one contiguous active window.
///
/// # Algorithm
///
/// 1. Clamp value to `[min_val, max_val]`
/// 2. Window start: `round((value - min_val) / (max_val - min_val) * (n - w))`
/// 3. Activate bits `[start, start + w)`
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarEncoder {
    params: ScalarEncoderParams,
    num_buckets: usize, // n - w, the number of window-start offsets
    range: f64,         // max_val - min_val
}

impl ScalarEncoder {
    /// Create a new ScalarEncoder.
    ///
    /// # Errors
    ///
    /// Returns [`ChatHtmError::InvalidParameter`] if:
    /// - `n` == 0
    /// - `w` == 0
    /// - `w` > `n`
    /// - `max_val` < `min_val`
    pub fn new(params: ScalarEncoderParams) -> Result<Self> {
        if params.n == 0 {
            return Err(ChatHtmError::InvalidParameter(format!(
                "ScalarEncoder: n must be > 0 (got {})",
                params.n
            )));
        }
        if params.w == 0 {
            return Err(ChatHtmError::InvalidParameter(format!(
                "ScalarEncoder: w must be > 0 (got {})",
                params.w
            )));
        }
        if params.w > params.n {
            return Err(ChatHtmError::InvalidParameter(format!(
                "ScalarEncoder: w must be <= n (got w={}, n={})",
                params.w, params.n
            )));
        }
        if params.max_val < params.min_val {
            return Err(ChatHtmError::InvalidParameter(format!(
                "ScalarEncoder: max_val must be >= min_val (got min_val={}, max_val={})",
                params.min_val, params.max_val
            )));
        }

        Ok(Self {
            params,
            num_buckets: params.n - params.w,
            range: params.max_val as f64 - params.min_val as f64,
        })
    }

    /// Encode a value into an SDR of length `n`.
    ///
    /// Values outside `[min_val, max_val]` are clamped, never rejected.
    pub fn encode(&self, value: i64) -> Sdr {
        let mut sdr = Sdr::new(self.params.n);
        sdr.set_range(self.window_start(value), self.params.w);
        sdr
    }

    /// Number of active bits shared by `encode(val_a)` and `encode(val_b)`.
    pub fn overlap(&self, val_a: i64, val_b: i64) -> usize {
        self.encode(val_a).num_similar(&self.encode(val_b))
    }

    /// First active bit of the encoding of `value`.
    pub fn window_start(&self, value: i64) -> usize {
        let value = value.clamp(self.params.min_val, self.params.max_val);
        if self.range <= 0.0 {
            return 0;
        }

        let percent = (value as f64 - self.params.min_val as f64) / self.range;
        let start = (percent * self.num_buckets as f64 + 0.5) as usize;

        // Guard against floating-point overshoot
        start.min(self.num_buckets)
    }

    /// Encoder parameters.
    pub fn params(&self) -> &ScalarEncoderParams {
        &self.params
    }

    /// Output SDR length (`n`).
    pub fn total_bits(&self) -> usize {
        self.params.n
    }

    /// Active bits per encoding (`w`).
    pub fn active_bits(&self) -> usize {
        self.params.w
    }

    /// Number of distinct window-start offsets beyond the first (`n - w`).
    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }
}
