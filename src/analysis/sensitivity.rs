//! Sensitivity analysis - how fragile the ranking is to uncertain inputs.
//!
//! Heuer's step 7 asks "what if my most important evidence is wrong?". This
//! analyzer selects ratings the analyst is least sure of, perturbs each one
//! on a cloned rating set, re-runs the consistency scorer, and reports which
//! hypotheses would change rank. Stored ratings are never mutated; every
//! simulation runs on a copy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::consistency::score_matrix;
use super::SCORE_EPSILON;
use crate::model::{Matrix, Rating};

/// A rank move of at least this many places classifies as critical.
///
/// Reconstructed from observed display behavior rather than an
/// authoritative source; kept as a single const so it can be retuned.
pub const CRITICAL_RANK_DELTA: i64 = 2;

/// How an uncertain rating is perturbed during simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerturbationMode {
    /// Drop the rating entirely, as if it had never been made.
    #[default]
    Remove,
    /// Shift the rating one step toward neutral.
    Soften,
}

impl std::fmt::Display for PerturbationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerturbationMode::Remove => write!(f, "remove"),
            PerturbationMode::Soften => write!(f, "soften"),
        }
    }
}

impl std::str::FromStr for PerturbationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remove" => Ok(PerturbationMode::Remove),
            "soften" => Ok(PerturbationMode::Soften),
            _ => Err(format!("Unknown perturbation mode: {}", s)),
        }
    }
}

/// Selects which ratings count as uncertain.
///
/// A rating matches when its confidence falls below `confidence_below` or
/// its evidence item's credibility falls below `credibility_below`. With
/// neither threshold set, nothing is uncertain and the report comes back
/// robust with zero perturbations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UncertaintyCriterion {
    /// Ratings with confidence strictly below this are uncertain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_below: Option<f64>,
    /// Ratings on evidence with credibility strictly below this are uncertain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credibility_below: Option<f64>,
    /// Perturbation applied to each uncertain rating.
    #[serde(default)]
    pub perturbation: PerturbationMode,
}

impl UncertaintyCriterion {
    /// Create a criterion that matches nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence threshold.
    pub fn with_confidence_below(mut self, threshold: f64) -> Self {
        self.confidence_below = Some(threshold);
        self
    }

    /// Set the evidence-credibility threshold.
    pub fn with_credibility_below(mut self, threshold: f64) -> Self {
        self.credibility_below = Some(threshold);
        self
    }

    /// Set the perturbation mode.
    pub fn with_perturbation(mut self, perturbation: PerturbationMode) -> Self {
        self.perturbation = perturbation;
        self
    }

    fn matches(&self, rating: &Rating, matrix: &Matrix) -> bool {
        if let Some(threshold) = self.confidence_below {
            if rating.confidence < threshold {
                return true;
            }
        }
        if let Some(threshold) = self.credibility_below {
            if let Some(evidence) = matrix.evidence_by_id(&rating.evidence_id) {
                if evidence.credibility < threshold {
                    return true;
                }
            }
        }
        false
    }
}

/// Severity of one observed change, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    /// Rank unchanged but the weighted score moved.
    Minor,
    /// Rank moved by one place.
    Moderate,
    /// Rank moved by two or more places.
    Critical,
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::Minor => write!(f, "minor"),
            ImpactLevel::Moderate => write!(f, "moderate"),
            ImpactLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Worst rank movement observed for one hypothesis across all perturbations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankChange {
    /// Hypothesis whose rank moved.
    pub hypothesis_id: String,
    /// Rank under the unperturbed ratings.
    pub original_rank: usize,
    /// Rank under the perturbation that produced the worst change.
    pub new_rank: usize,
    /// Severity of the change.
    pub change: ImpactLevel,
}

/// Overall robustness label for the ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityLabel {
    /// No rank movement under any perturbation.
    #[default]
    Robust,
    /// At least one single-place rank move.
    Moderate,
    /// At least one critical rank move.
    Fragile,
}

impl std::fmt::Display for SensitivityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensitivityLabel::Robust => write!(f, "robust"),
            SensitivityLabel::Moderate => write!(f, "moderate"),
            SensitivityLabel::Fragile => write!(f, "fragile"),
        }
    }
}

/// Result of a sensitivity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// Reportable changes, worst impact first.
    pub rank_changes: Vec<RankChange>,
    /// Distinct evidence items carrying at least one uncertain rating.
    pub uncertain_evidence_count: usize,
    /// Overall robustness of the ranking.
    pub label: SensitivityLabel,
}

/// Perturb each uncertain rating in turn and measure rank movement.
///
/// Performs one full consistency re-score per uncertain rating on a cloned
/// matrix. Each hypothesis appears at most once in the report, carrying the
/// worst impact any single perturbation produced for it.
pub fn analyze_sensitivity(matrix: &Matrix, criterion: &UncertaintyCriterion) -> SensitivityReport {
    let baseline = score_matrix(matrix);
    let baseline_by_id: HashMap<&str, (usize, f64)> = baseline
        .iter()
        .map(|s| (s.hypothesis_id.as_str(), (s.rank, s.weighted_score)))
        .collect();

    let uncertain: Vec<(String, String)> = matrix
        .ratings()
        .iter()
        .filter(|r| criterion.matches(r, matrix))
        .map(|r| (r.evidence_id.clone(), r.hypothesis_id.clone()))
        .collect();

    let mut uncertain_evidence: Vec<&str> = Vec::new();
    for (evidence_id, _) in &uncertain {
        if !uncertain_evidence.contains(&evidence_id.as_str()) {
            uncertain_evidence.push(evidence_id);
        }
    }

    let mut worst: HashMap<String, RankChange> = HashMap::new();

    for (evidence_id, hypothesis_id) in &uncertain {
        let mut perturbed = matrix.clone();
        match criterion.perturbation {
            PerturbationMode::Remove => {
                perturbed.unrate(evidence_id, hypothesis_id);
            }
            PerturbationMode::Soften => {
                if let Some(rating) = perturbed.rating(evidence_id, hypothesis_id).cloned() {
                    let softened = rating.value.soften();
                    let mut replacement = rating;
                    replacement.value = softened;
                    // Ids were valid in the clone's source, so the upsert
                    // cannot fail; skip quietly if the pair vanished.
                    let _ = perturbed.rate(replacement);
                }
            }
        }

        let rerun = score_matrix(&perturbed);
        for score in &rerun {
            let Some(&(original_rank, original_score)) =
                baseline_by_id.get(score.hypothesis_id.as_str())
            else {
                continue;
            };
            let rank_delta = original_rank as i64 - score.rank as i64;
            let impact = classify_impact(rank_delta, original_score, score.weighted_score);
            let Some(impact) = impact else { continue };

            debug!(
                evidence_id = %evidence_id,
                hypothesis_id = %score.hypothesis_id,
                rank_delta,
                impact = %impact,
                "Perturbation moved a hypothesis"
            );

            let candidate = RankChange {
                hypothesis_id: score.hypothesis_id.clone(),
                original_rank,
                new_rank: score.rank,
                change: impact,
            };
            worst
                .entry(score.hypothesis_id.clone())
                .and_modify(|existing| {
                    if candidate.change > existing.change {
                        *existing = candidate.clone();
                    }
                })
                .or_insert(candidate);
        }
    }

    let mut rank_changes: Vec<RankChange> = worst.into_values().collect();
    rank_changes.sort_by(|a, b| {
        b.change
            .cmp(&a.change)
            .then_with(|| a.original_rank.cmp(&b.original_rank))
            .then_with(|| a.hypothesis_id.cmp(&b.hypothesis_id))
    });

    let label = if rank_changes.iter().any(|c| c.change == ImpactLevel::Critical) {
        SensitivityLabel::Fragile
    } else if rank_changes.iter().any(|c| c.change == ImpactLevel::Moderate) {
        SensitivityLabel::Moderate
    } else {
        SensitivityLabel::Robust
    };

    info!(
        uncertain_ratings = uncertain.len(),
        uncertain_evidence = uncertain_evidence.len(),
        changes = rank_changes.len(),
        label = %label,
        "Sensitivity analysis completed"
    );

    SensitivityReport {
        rank_changes,
        uncertain_evidence_count: uncertain_evidence.len(),
        label,
    }
}

fn classify_impact(rank_delta: i64, original_score: f64, new_score: f64) -> Option<ImpactLevel> {
    if rank_delta.abs() >= CRITICAL_RANK_DELTA {
        Some(ImpactLevel::Critical)
    } else if rank_delta.abs() == 1 {
        Some(ImpactLevel::Moderate)
    } else if (original_score - new_score).abs() > SCORE_EPSILON {
        Some(ImpactLevel::Minor)
    } else {
        None
    }
}
