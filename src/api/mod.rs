//! Boundary records and entry points for the surrounding system.
//!
//! The reference deployment fronts the engine with an HTTP API; the engine
//! itself exchanges only plain serde records. Each entry point validates its
//! request wholesale - exact rating and strength tokens, numeric ranges,
//! referential integrity - and either returns a complete result or an error
//! naming the offending field. Nothing is coerced and nothing is partially
//! applied, so a caller's last good result survives any failed call.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{
    analyze_diagnosticity, analyze_sensitivity, score_matrix, DiagnosticityLevel,
    PerturbationMode, SensitivityReport, UncertaintyCriterion,
};
use crate::deception::{
    ChecklistType, DeceptionAssessment, DeceptionChecklist, DeceptionIndicator, DeceptionSummary,
    IndicatorStrength,
};
use crate::error::{AchError, AchResult};
use crate::model::{Evidence, EvidenceType, Hypothesis, HypothesisScore, Matrix, Rating, RatingValue};

fn default_weight() -> f64 {
    1.0
}

// ============================================================================
// Matrix Requests
// ============================================================================

/// A hypothesis supplied at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesisRecord {
    /// Caller-assigned hypothesis ID.
    pub id: String,
    /// Hypothesis statement.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Creating analyst.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Lead hypothesis flag.
    #[serde(default)]
    pub is_lead: bool,
}

/// An evidence item supplied at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Caller-assigned evidence ID.
    pub id: String,
    /// What the evidence says.
    pub description: String,
    /// Where it came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Evidence type token (`fact`, `testimony`, `document`, `physical`,
    /// `circumstantial`, `inference`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_type: Option<String>,
    /// Source credibility (0.0-1.0, default 1.0).
    #[serde(default = "default_weight")]
    pub credibility: f64,
    /// Relevance (0.0-1.0, default 1.0).
    #[serde(default = "default_weight")]
    pub relevance: f64,
}

/// A rating supplied at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    /// Evidence being rated.
    pub evidence_id: String,
    /// Hypothesis rated against.
    pub hypothesis_id: String,
    /// Rating token; exactly one of `--`, `-`, `N`, `+`, `++`, `N/A`.
    pub value: String,
    /// Analyst confidence (0.0-1.0, default 1.0).
    #[serde(default = "default_weight")]
    pub confidence: f64,
    /// Analyst reasoning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Matrix snapshot for a scoring or diagnosticity run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// Hypotheses, in creation order.
    #[serde(default)]
    pub hypotheses: Vec<HypothesisRecord>,
    /// Evidence items.
    #[serde(default)]
    pub evidence: Vec<EvidenceRecord>,
    /// Ratings over the above.
    #[serde(default)]
    pub ratings: Vec<RatingRecord>,
}

impl ScoreRequest {
    /// Deserialize a request from JSON.
    pub fn from_json(json: &str) -> AchResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the request and build the matrix it describes.
    ///
    /// The hypothesis list order is taken as creation order. Bad tokens and
    /// out-of-range numerics are validation errors naming the field; ratings
    /// referencing unknown IDs are not-found errors.
    pub fn into_matrix(self) -> AchResult<Matrix> {
        let mut matrix = Matrix::new();

        for (i, record) in self.hypotheses.into_iter().enumerate() {
            let mut hypothesis = Hypothesis::new(record.title)
                .with_id(record.id)
                .with_description(record.description)
                .with_display_order(i as i32);
            if let Some(author) = record.author {
                hypothesis = hypothesis.with_author(author);
            }
            if record.is_lead {
                hypothesis = hypothesis.as_lead();
            }
            matrix.add_hypothesis(hypothesis)?;
        }

        for (i, record) in self.evidence.into_iter().enumerate() {
            let evidence_type = match record.evidence_type {
                Some(token) => EvidenceType::from_str(&token).map_err(|reason| {
                    AchError::validation(format!("evidence[{}].evidence_type", i), reason)
                })?,
                None => EvidenceType::default(),
            };
            let mut evidence = Evidence::new(record.description)
                .with_id(record.id)
                .with_type(evidence_type)
                .with_credibility(record.credibility)
                .with_relevance(record.relevance)
                .with_display_order(i as i32);
            if let Some(source) = record.source {
                evidence = evidence.with_source(source);
            }
            matrix.add_evidence(evidence)?;
        }

        for (i, record) in self.ratings.into_iter().enumerate() {
            let value = RatingValue::from_str(&record.value).map_err(|reason| {
                AchError::validation(format!("ratings[{}].value", i), reason)
            })?;
            let mut rating = Rating::new(record.evidence_id, record.hypothesis_id, value)
                .with_confidence(record.confidence);
            if let Some(reasoning) = record.reasoning {
                rating = rating.with_reasoning(reasoning);
            }
            matrix.rate(rating)?;
        }

        Ok(matrix)
    }
}

/// Matrix snapshot plus uncertainty criterion for a sensitivity run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensitivityRequest {
    /// The matrix to analyze.
    #[serde(flatten)]
    pub matrix: ScoreRequest,
    /// Ratings with confidence strictly below this are uncertain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_below: Option<f64>,
    /// Ratings on evidence with credibility strictly below this are uncertain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credibility_below: Option<f64>,
    /// Perturbation token, `remove` (default) or `soften`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perturbation: Option<String>,
}

// ============================================================================
// Deception Requests
// ============================================================================

/// An indicator supplied at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRecord {
    /// The elicitation question.
    #[serde(default)]
    pub question: String,
    /// Strength token; exactly one of `none`, `weak`, `moderate`, `strong`,
    /// `conclusive`.
    pub strength: String,
    /// Analyst confidence (0.0-1.0, default 1.0).
    #[serde(default = "default_weight")]
    pub confidence: f64,
    /// Supporting evidence references.
    #[serde(default)]
    pub evidence_refs: Vec<String>,
    /// Analyst notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A checklist supplied at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistRecord {
    /// Checklist type token; exactly one of `mom`, `pop`, `moses`, `eve`.
    pub checklist_type: String,
    /// The checklist's indicators.
    #[serde(default)]
    pub indicators: Vec<IndicatorRecord>,
}

/// A deception assessment with its attached checklists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeceptionRequest {
    /// Assessment the recalculation is for.
    pub assessment_id: String,
    /// Zero to four checklists, at most one per type.
    #[serde(default)]
    pub checklists: Vec<ChecklistRecord>,
}

impl DeceptionRequest {
    /// Deserialize a request from JSON.
    pub fn from_json(json: &str) -> AchResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-evidence diagnosticity result at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticityRecord {
    /// Evidence the record is about.
    pub evidence_id: String,
    /// Distinct ratings over hypothesis count, 0.0-1.0.
    pub diagnosticity_score: f64,
    /// Discriminates strongly between hypotheses.
    pub is_high_diagnostic: bool,
    /// Uniform across hypotheses; a removal candidate.
    pub is_low_diagnostic: bool,
}

// ============================================================================
// Entry Points
// ============================================================================

/// Recalculate the ranked score set for a matrix snapshot.
///
/// Returns one score per hypothesis, ordered by rank with dense `1..N`
/// ranks and no repeated rank values.
pub fn recalculate_scores(request: ScoreRequest) -> AchResult<Vec<HypothesisScore>> {
    let matrix = request.into_matrix()?;
    let scores = score_matrix(&matrix);
    info!(hypotheses = scores.len(), "Recalculate scores completed");
    Ok(scores)
}

/// Produce the per-evidence diagnosticity report for a matrix snapshot.
pub fn diagnosticity_report(request: ScoreRequest) -> AchResult<Vec<DiagnosticityRecord>> {
    let matrix = request.into_matrix()?;
    let records: Vec<DiagnosticityRecord> = analyze_diagnosticity(&matrix)
        .into_iter()
        .map(|finding| DiagnosticityRecord {
            evidence_id: finding.evidence_id,
            diagnosticity_score: finding.score,
            is_high_diagnostic: finding.level == DiagnosticityLevel::High,
            is_low_diagnostic: finding.level == DiagnosticityLevel::Low,
        })
        .collect();
    info!(evidence = records.len(), "Diagnosticity report completed");
    Ok(records)
}

/// Run a sensitivity analysis over a matrix snapshot.
pub fn sensitivity_report(request: SensitivityRequest) -> AchResult<SensitivityReport> {
    let perturbation = match request.perturbation {
        Some(token) => PerturbationMode::from_str(&token)
            .map_err(|reason| AchError::validation("perturbation", reason))?,
        None => PerturbationMode::default(),
    };

    let mut criterion = UncertaintyCriterion::new().with_perturbation(perturbation);
    if let Some(threshold) = request.confidence_below {
        criterion = criterion.with_confidence_below(threshold);
    }
    if let Some(threshold) = request.credibility_below {
        criterion = criterion.with_credibility_below(threshold);
    }

    let matrix = request.matrix.into_matrix()?;
    let report = analyze_sensitivity(&matrix, &criterion);
    info!(label = %report.label, "Sensitivity report completed");
    Ok(report)
}

/// Recalculate a deception assessment's checklist and overall scores.
pub fn deception_recalculate(request: DeceptionRequest) -> AchResult<DeceptionSummary> {
    let mut assessment = DeceptionAssessment::new().with_id(request.assessment_id);

    for (i, record) in request.checklists.into_iter().enumerate() {
        let checklist_type = ChecklistType::from_str(&record.checklist_type).map_err(|reason| {
            AchError::validation(format!("checklists[{}].checklist_type", i), reason)
        })?;
        if assessment.checklist(checklist_type).is_some() {
            return Err(AchError::validation(
                format!("checklists[{}].checklist_type", i),
                format!("duplicate checklist type: {}", checklist_type),
            ));
        }

        let mut checklist = DeceptionChecklist::new(checklist_type);
        for (j, indicator) in record.indicators.into_iter().enumerate() {
            let strength = IndicatorStrength::from_str(&indicator.strength).map_err(|reason| {
                AchError::validation(
                    format!("checklists[{}].indicators[{}].strength", i, j),
                    reason,
                )
            })?;
            if !(0.0..=1.0).contains(&indicator.confidence) {
                return Err(AchError::validation(
                    format!("checklists[{}].indicators[{}].confidence", i, j),
                    "must be between 0 and 1",
                ));
            }
            let mut built = DeceptionIndicator::new(checklist_type, indicator.question)
                .with_strength(strength)
                .with_confidence(indicator.confidence);
            built.evidence_refs = indicator.evidence_refs;
            if let Some(notes) = indicator.notes {
                built = built.with_notes(notes);
            }
            checklist.add_indicator(built);
        }
        assessment.set_checklist(checklist);
    }

    Ok(assessment.recalculate())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_request() -> ScoreRequest {
        ScoreRequest {
            hypotheses: vec![
                HypothesisRecord {
                    id: "h1".to_string(),
                    title: "H1".to_string(),
                    description: String::new(),
                    author: None,
                    is_lead: false,
                },
                HypothesisRecord {
                    id: "h2".to_string(),
                    title: "H2".to_string(),
                    description: String::new(),
                    author: None,
                    is_lead: false,
                },
            ],
            evidence: vec![EvidenceRecord {
                id: "e1".to_string(),
                description: "E1".to_string(),
                source: None,
                evidence_type: Some("testimony".to_string()),
                credibility: 1.0,
                relevance: 1.0,
            }],
            ratings: vec![RatingRecord {
                evidence_id: "e1".to_string(),
                hypothesis_id: "h1".to_string(),
                value: "--".to_string(),
                confidence: 1.0,
                reasoning: None,
            }],
        }
    }

    #[test]
    fn test_recalculate_scores_orders_and_ranks() {
        let scores = recalculate_scores(score_request()).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].hypothesis_id, "h2");
        assert_eq!(scores[0].rank, 1);
        assert_eq!(scores[1].hypothesis_id, "h1");
        assert_eq!(scores[1].rank, 2);
        assert_eq!(scores[1].weighted_score, 2.0);
    }

    #[test]
    fn test_invalid_rating_token_names_the_field() {
        let mut request = score_request();
        request.ratings[0].value = "+-".to_string();
        let err = recalculate_scores(request).unwrap_err();
        match err {
            AchError::Validation { field, reason } => {
                assert_eq!(field, "ratings[0].value");
                assert!(reason.contains("+-"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_evidence_type_token_names_the_field() {
        let mut request = score_request();
        request.evidence[0].evidence_type = Some("hearsay".to_string());
        let err = recalculate_scores(request).unwrap_err();
        assert!(matches!(
            err,
            AchError::Validation { ref field, .. } if field == "evidence[0].evidence_type"
        ));
    }

    #[test]
    fn test_dangling_rating_reference_is_not_found() {
        let mut request = score_request();
        request.ratings[0].hypothesis_id = "h9".to_string();
        let err = recalculate_scores(request).unwrap_err();
        assert!(matches!(err, AchError::HypothesisNotFound { ref id } if id == "h9"));
    }

    #[test]
    fn test_empty_request_yields_empty_scores() {
        let scores = recalculate_scores(ScoreRequest::default()).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_score_request_from_json() {
        let json = r#"{
            "hypotheses": [{"id": "h1", "title": "H1"}],
            "evidence": [{"id": "e1", "description": "E1"}],
            "ratings": [{"evidence_id": "e1", "hypothesis_id": "h1", "value": "N/A"}]
        }"#;
        let request = ScoreRequest::from_json(json).unwrap();
        assert_eq!(request.ratings[0].value, "N/A");

        let scores = recalculate_scores(request).unwrap();
        // The only rating is N/A, so nothing is counted.
        assert_eq!(scores[0].evidence_count, 0);
    }

    #[test]
    fn test_score_request_from_json_rejects_malformed_input() {
        assert!(matches!(
            ScoreRequest::from_json("{not json"),
            Err(AchError::Json(_))
        ));
    }

    #[test]
    fn test_diagnosticity_report_flags() {
        let mut request = score_request();
        request.ratings.push(RatingRecord {
            evidence_id: "e1".to_string(),
            hypothesis_id: "h2".to_string(),
            value: "++".to_string(),
            confidence: 1.0,
            reasoning: None,
        });

        let records = diagnosticity_report(request).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].evidence_id, "e1");
        assert!(records[0].is_high_diagnostic);
        assert!(!records[0].is_low_diagnostic);
        assert!((records[0].diagnosticity_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sensitivity_report_rejects_bad_perturbation_token() {
        let request = SensitivityRequest {
            matrix: score_request(),
            confidence_below: Some(0.5),
            credibility_below: None,
            perturbation: Some("invert".to_string()),
        };
        let err = sensitivity_report(request).unwrap_err();
        assert!(matches!(
            err,
            AchError::Validation { ref field, .. } if field == "perturbation"
        ));
    }

    #[test]
    fn test_sensitivity_report_runs_with_defaults() {
        let request = SensitivityRequest {
            matrix: score_request(),
            confidence_below: Some(0.5),
            credibility_below: None,
            perturbation: None,
        };
        let report = sensitivity_report(request).unwrap();
        // The only rating has full confidence, so nothing is uncertain.
        assert_eq!(report.uncertain_evidence_count, 0);
    }

    #[test]
    fn test_deception_recalculate_aggregates() {
        let request = DeceptionRequest {
            assessment_id: "assess-1".to_string(),
            checklists: vec![ChecklistRecord {
                checklist_type: "mom".to_string(),
                indicators: vec![IndicatorRecord {
                    question: "q1".to_string(),
                    strength: "conclusive".to_string(),
                    confidence: 1.0,
                    evidence_refs: vec![],
                    notes: None,
                }],
            }],
        };
        let summary = deception_recalculate(request).unwrap();
        assert_eq!(summary.assessment_id, "assess-1");
        assert!((summary.overall_score - 35.0).abs() < 1e-12);
    }

    #[test]
    fn test_deception_recalculate_rejects_bad_tokens() {
        let request = DeceptionRequest {
            assessment_id: "a".to_string(),
            checklists: vec![ChecklistRecord {
                checklist_type: "mice".to_string(),
                indicators: vec![],
            }],
        };
        let err = deception_recalculate(request).unwrap_err();
        assert!(matches!(
            err,
            AchError::Validation { ref field, .. } if field == "checklists[0].checklist_type"
        ));

        let request = DeceptionRequest {
            assessment_id: "a".to_string(),
            checklists: vec![ChecklistRecord {
                checklist_type: "mom".to_string(),
                indicators: vec![IndicatorRecord {
                    question: String::new(),
                    strength: "overwhelming".to_string(),
                    confidence: 1.0,
                    evidence_refs: vec![],
                    notes: None,
                }],
            }],
        };
        let err = deception_recalculate(request).unwrap_err();
        assert!(matches!(
            err,
            AchError::Validation { ref field, .. } if field == "checklists[0].indicators[0].strength"
        ));
    }

    #[test]
    fn test_deception_recalculate_rejects_duplicate_checklist_type() {
        let request = DeceptionRequest {
            assessment_id: "a".to_string(),
            checklists: vec![
                ChecklistRecord {
                    checklist_type: "eve".to_string(),
                    indicators: vec![],
                },
                ChecklistRecord {
                    checklist_type: "eve".to_string(),
                    indicators: vec![],
                },
            ],
        };
        let err = deception_recalculate(request).unwrap_err();
        assert!(matches!(
            err,
            AchError::Validation { ref field, .. } if field == "checklists[1].checklist_type"
        ));
    }
}
