//! Analysis implementations over a rating matrix.
//!
//! This module provides the three matrix analyses:
//! - consistency: inconsistency counting and hypothesis ranking
//! - diagnosticity: which evidence discriminates between hypotheses
//! - sensitivity: rank robustness under perturbed uncertain ratings
//!
//! All analyses are pure, synchronous functions over an in-memory
//! [`Matrix`](crate::model::Matrix) snapshot. Repeated calls on unchanged
//! input produce identical output, and each call returns a wholesale result
//! set; nothing is patched incrementally.

mod consistency;
mod diagnosticity;
mod sensitivity;

pub use consistency::*;
pub use diagnosticity::*;
pub use sensitivity::*;

/// Weighted-score movements at or below this are treated as no change.
pub const SCORE_EPSILON: f64 = 1e-9;
