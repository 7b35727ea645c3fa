//! Diagnosticity analysis - which evidence discriminates between hypotheses.
//!
//! Evidence rated the same way against every hypothesis tells the analyst
//! nothing about which hypothesis to prefer, however strongly it is rated.
//! This analyzer classifies each evidence item by how many distinct rating
//! values it uses across the hypothesis set. It only classifies; resorting
//! the display or removing non-diagnostic evidence is the caller's business.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{Matrix, RatingValue};

/// An item is highly diagnostic when its distinct rating count reaches
/// `ceil(HIGH_DIAGNOSTIC_RATIO x hypothesis count)`.
///
/// Reconstructed from observed display behavior rather than an
/// authoritative source; kept as a single const so it can be retuned.
pub const HIGH_DIAGNOSTIC_RATIO: f64 = 0.7;

/// Minimum rated (non-N/A) cells before an item can be classified at all.
pub const MIN_RATED_CELLS: usize = 2;

/// Diagnosticity classification for one evidence item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticityLevel {
    /// Discriminates strongly between hypotheses.
    High,
    /// Uniform across hypotheses; a removal candidate.
    Low,
    /// Neither extreme, or too few rated cells to judge.
    #[default]
    Normal,
}

impl std::fmt::Display for DiagnosticityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticityLevel::High => write!(f, "high"),
            DiagnosticityLevel::Low => write!(f, "low"),
            DiagnosticityLevel::Normal => write!(f, "normal"),
        }
    }
}

/// Diagnosticity finding for one evidence item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDiagnosticity {
    /// Evidence the finding is about.
    pub evidence_id: String,
    /// Distinct rating values used across hypotheses (N/A excluded).
    pub distinct_ratings: usize,
    /// Rated, non-N/A cells for this item.
    pub rated_cells: usize,
    /// Distinct ratings over hypothesis count, 0.0-1.0.
    pub score: f64,
    /// Classification.
    pub level: DiagnosticityLevel,
}

/// Classify every evidence item in the matrix.
///
/// Items with fewer than [`MIN_RATED_CELLS`] rated cells classify
/// [`Normal`](DiagnosticityLevel::Normal) (insufficient data). With enough
/// cells, a single distinct value classifies
/// [`Low`](DiagnosticityLevel::Low) and reaching the high threshold
/// classifies [`High`](DiagnosticityLevel::High).
pub fn analyze_diagnosticity(matrix: &Matrix) -> Vec<EvidenceDiagnosticity> {
    let hypothesis_count = matrix.hypothesis_count();
    let high_threshold = (HIGH_DIAGNOSTIC_RATIO * hypothesis_count as f64).ceil() as usize;

    let findings: Vec<EvidenceDiagnosticity> = matrix
        .evidence()
        .iter()
        .map(|evidence| {
            let mut distinct: Vec<RatingValue> = Vec::new();
            let mut rated_cells = 0usize;

            for hypothesis in matrix.hypotheses() {
                let Some(rating) = matrix.rating(&evidence.id, &hypothesis.id) else {
                    continue;
                };
                if rating.value.scale_position().is_none() {
                    continue;
                }
                rated_cells += 1;
                if !distinct.contains(&rating.value) {
                    distinct.push(rating.value);
                }
            }

            let level = if rated_cells < MIN_RATED_CELLS {
                DiagnosticityLevel::Normal
            } else if distinct.len() == 1 {
                DiagnosticityLevel::Low
            } else if distinct.len() >= high_threshold {
                DiagnosticityLevel::High
            } else {
                DiagnosticityLevel::Normal
            };

            let score = if hypothesis_count > 0 {
                distinct.len() as f64 / hypothesis_count as f64
            } else {
                0.0
            };

            debug!(
                evidence_id = %evidence.id,
                distinct = distinct.len(),
                rated_cells,
                level = %level,
                "Classified evidence diagnosticity"
            );

            EvidenceDiagnosticity {
                evidence_id: evidence.id.clone(),
                distinct_ratings: distinct.len(),
                rated_cells,
                score,
                level,
            }
        })
        .collect();

    info!(
        evidence = findings.len(),
        high = findings
            .iter()
            .filter(|f| f.level == DiagnosticityLevel::High)
            .count(),
        low = findings
            .iter()
            .filter(|f| f.level == DiagnosticityLevel::Low)
            .count(),
        "Diagnosticity analysis completed"
    );

    findings
}
