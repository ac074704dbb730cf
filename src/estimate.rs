//! Word count and size estimation
//!
//! Totals are computed exactly with `BigUint`, since `|alphabet|^max`
//! leaves the range of any fixed-width integer very quickly.

use crate::error::{GenerationError, Result};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::num::NonZeroU64;

/// Inclusive range of word lengths, `1 <= min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    min: u32,
    max: u32,
}

impl LengthRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min == 0 || min > max {
            return Err(GenerationError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Midpoint length used by the size heuristic
    pub fn mean(&self) -> u32 {
        // Summed in u64 so `u32::MAX` bounds cannot overflow
        ((self.min as u64 + self.max as u64) / 2) as u32
    }
}

/// Pre-generation plan: how many words will be written and roughly how large the file gets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate {
    /// Full cross product over the length range
    pub combinations: BigUint,
    /// Words that will actually be written (post-cutoff)
    pub total_words: BigUint,
    /// True when the cutoff is smaller than `combinations`
    pub truncated: bool,
    /// Approximate output size in bytes.
    ///
    /// This is a heuristic: every word is assumed to have the midpoint length
    /// `(min + max) / 2`, so the figure is not exact when `min != max`.
    pub estimated_bytes: BigUint,
}

impl Estimate {
    /// `total_words` clamped to `u64::MAX`
    pub fn total_words_u64(&self) -> u64 {
        saturate(&self.total_words)
    }

    /// `estimated_bytes` clamped to `u64::MAX`
    pub fn estimated_bytes_u64(&self) -> u64 {
        saturate(&self.estimated_bytes)
    }

    /// Estimated size in MiB, for display only
    pub fn estimated_megabytes(&self) -> f64 {
        self.estimated_bytes.to_f64().unwrap_or(f64::INFINITY) / (1024.0 * 1024.0)
    }
}

/// `Σ a^L` for `L` in `min..=max`, via the geometric series closed form
pub fn combinations(alphabet_size: usize, range: LengthRange) -> BigUint {
    match alphabet_size {
        0 => BigUint::zero(),
        1 => BigUint::from(range.max() - range.min() + 1),
        _ => {
            let base = BigUint::from(alphabet_size);
            let high = base.pow(range.max()) * &base;
            let low = base.pow(range.min());
            (high - low) / (base - 1u32)
        }
    }
}

/// Compute the plan for a run before any word is written.
///
/// The prefix length is counted in characters.
pub fn estimate(
    alphabet_size: usize,
    range: LengthRange,
    prefix: &str,
    max_words: Option<NonZeroU64>,
) -> Estimate {
    let combinations = combinations(alphabet_size, range);

    let (total_words, truncated) = match max_words {
        Some(cutoff) if BigUint::from(cutoff.get()) < combinations => {
            (BigUint::from(cutoff.get()), true)
        }
        _ => (combinations.clone(), false),
    };

    let line_len = prefix.chars().count() as u64 + range.mean() as u64 + 1;
    let estimated_bytes = &total_words * line_len;

    Estimate {
        combinations,
        total_words,
        truncated,
        estimated_bytes,
    }
}

fn saturate(value: &BigUint) -> u64 {
    value.to_u64().unwrap_or(u64::MAX)
}
