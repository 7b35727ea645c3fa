//! Consistency scoring - Heuer's inconsistency-counting ranking.
//!
//! The scorer turns a rating matrix into one [`HypothesisScore`] per
//! hypothesis, ranked ascending by weighted inconsistency. Only
//! inconsistency disqualifies: `-` and `--` ratings accumulate penalty
//! weight, while supporting ratings contribute nothing, per Heuer's
//! principle that evidence can refute a hypothesis but never prove it.

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::model::{HypothesisScore, Matrix};

/// Compute a full, ranked score set for the matrix.
///
/// For each hypothesis, every rated non-N/A cell contributes
/// `penalty(value) x credibility(evidence) x confidence(rating)` to the
/// weighted score; unrated and N/A pairs are excluded from both the sum and
/// the evidence count. Ranks are a dense `1..N` permutation: ties on
/// weighted score break by inconsistency count, then unrated hypotheses
/// order last, then creation order decides.
///
/// An empty matrix yields an empty score list; that is a legitimate
/// mid-construction state, not an error.
pub fn score_matrix(matrix: &Matrix) -> Vec<HypothesisScore> {
    let mut scored: Vec<(usize, HypothesisScore)> = Vec::with_capacity(matrix.hypothesis_count());

    for (position, hypothesis) in matrix.hypotheses().iter().enumerate() {
        let mut inconsistency_count = 0usize;
        let mut weighted_score = 0.0f64;
        let mut evidence_count = 0usize;

        for evidence in matrix.evidence() {
            let Some(rating) = matrix.rating(&evidence.id, &hypothesis.id) else {
                continue;
            };
            // N/A removes the cell from the analysis entirely.
            if rating.value.scale_position().is_none() {
                continue;
            }
            evidence_count += 1;
            if rating.value.is_inconsistent() {
                inconsistency_count += 1;
            }
            weighted_score += rating.value.penalty() * evidence.credibility * rating.confidence;
        }

        let normalized_score = if evidence_count > 0 {
            weighted_score / evidence_count as f64
        } else {
            0.0
        };

        debug!(
            hypothesis_id = %hypothesis.id,
            inconsistency_count,
            weighted_score,
            evidence_count,
            "Scored hypothesis"
        );

        scored.push((
            position,
            HypothesisScore {
                hypothesis_id: hypothesis.id.clone(),
                rank: 0,
                inconsistency_count,
                weighted_score,
                normalized_score,
                evidence_count,
            },
        ));
    }

    scored.sort_by(|(pos_a, a), (pos_b, b)| {
        a.weighted_score
            .total_cmp(&b.weighted_score)
            .then_with(|| a.inconsistency_count.cmp(&b.inconsistency_count))
            // Hypotheses nothing has been rated against sort after rated
            // ones carrying the same score.
            .then_with(|| (a.evidence_count == 0).cmp(&(b.evidence_count == 0)))
            .then_with(|| pos_a.cmp(pos_b))
    });

    let scores: Vec<HypothesisScore> = scored
        .into_iter()
        .enumerate()
        .map(|(i, (_, mut score))| {
            score.rank = i + 1;
            score
        })
        .collect();

    info!(
        hypotheses = scores.len(),
        evidence = matrix.evidence_count(),
        ratings = matrix.ratings().len(),
        "Consistency scoring completed"
    );

    scores
}

/// Comparison used for rank ordering, exposed for callers that need to
/// re-sort cached score rows the same way the scorer does.
pub fn compare_scores(a: &HypothesisScore, b: &HypothesisScore) -> Ordering {
    a.weighted_score
        .total_cmp(&b.weighted_score)
        .then_with(|| a.inconsistency_count.cmp(&b.inconsistency_count))
        .then_with(|| (a.evidence_count == 0).cmp(&(b.evidence_count == 0)))
}
