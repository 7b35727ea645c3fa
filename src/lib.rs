//! # ACH Engine
//!
//! A scoring engine for the Analysis of Competing Hypotheses (ACH), Richards
//! Heuer's structured technique for judging among explanations by counting
//! disqualifying inconsistencies rather than accumulating support.
//!
//! ## Features
//!
//! - **Consistency Scoring**: weighted inconsistency counts and a dense
//!   hypothesis ranking over an evidence-vs-hypothesis rating matrix
//! - **Diagnosticity Analysis**: flags evidence that fails to discriminate
//!   between hypotheses, however strongly it is rated
//! - **Sensitivity Analysis**: perturbs the least-certain ratings and
//!   measures how fragile the ranking is
//! - **Deception Risk Assessment**: aggregates the MOM/POP/MOSES/EVE
//!   structured checklists into one weighted source-deception risk signal
//!
//! ## Design
//!
//! Every analysis is a pure, synchronous function over an in-memory
//! [`Matrix`] or [`DeceptionAssessment`](deception::DeceptionAssessment)
//! snapshot. Scoring identical input twice yields identical output, and each
//! run replaces the prior result wholesale. The method is deliberately
//! non-probabilistic: evidence can disqualify a hypothesis but never prove
//! one. Persistence, transport, and text extraction are external
//! collaborators; callers serialize writes per matrix before invoking any
//! scorer.
//!
//! ## Example
//!
//! ```
//! use ach_engine::analysis::score_matrix;
//! use ach_engine::model::{Evidence, Hypothesis, Matrix, Rating, RatingValue};
//!
//! # fn main() -> ach_engine::AchResult<()> {
//! let mut matrix = Matrix::new();
//! matrix.add_hypothesis(Hypothesis::new("Deliberate action").with_id("h1"))?;
//! matrix.add_hypothesis(Hypothesis::new("Accident").with_id("h2"))?;
//! matrix.add_evidence(Evidence::new("No warning was issued").with_id("e1"))?;
//! matrix.rate(Rating::new("e1", "h2", RatingValue::Inconsistent))?;
//!
//! let scores = score_matrix(&matrix);
//! assert_eq!(scores[0].hypothesis_id, "h1");
//! assert_eq!(scores[0].rank, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Matrix analyses: consistency scoring, diagnosticity, sensitivity.
pub mod analysis;
/// Boundary records and entry points for the surrounding system.
pub mod api;
/// MOM/POP/MOSES/EVE deception risk checklists and aggregation.
pub mod deception;
/// Error types and result aliases for the engine.
pub mod error;
/// Matrix data model: hypotheses, evidence, ratings, scores.
pub mod model;

pub use error::{AchError, AchResult};
pub use model::Matrix;
