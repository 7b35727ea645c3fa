//! Matrix data model for competing-hypothesis analysis.
//!
//! This module provides the in-memory records an ACH matrix is built from:
//! hypotheses, evidence items, consistency ratings keyed by
//! (evidence, hypothesis) pairs, and the derived per-hypothesis scores.
//! The [`Matrix`] container owns one analysis snapshot and enforces
//! referential integrity: ratings may only reference known hypotheses and
//! evidence, upserts are last-write-wins, and deleting a hypothesis or
//! evidence item cascades to its ratings.

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AchError, AchResult};

/// A consistency judgment on the Heuer rating scale.
///
/// The five scale values form a strict total order from strongly
/// inconsistent to strongly consistent; `N/A` sits outside the scale and is
/// excluded from all scoring arithmetic. The serialized tokens are exactly
/// `--`, `-`, `N`, `+`, `++`, and `N/A` - anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingValue {
    /// Strongly inconsistent with the hypothesis (`--`).
    #[serde(rename = "--")]
    StronglyInconsistent,
    /// Inconsistent with the hypothesis (`-`).
    #[serde(rename = "-")]
    Inconsistent,
    /// Neutral, compatible either way (`N`).
    #[serde(rename = "N")]
    Neutral,
    /// Consistent with the hypothesis (`+`).
    #[serde(rename = "+")]
    Consistent,
    /// Strongly consistent with the hypothesis (`++`).
    #[serde(rename = "++")]
    StronglyConsistent,
    /// Not applicable to this hypothesis (`N/A`).
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl RatingValue {
    /// Disqualifying weight contributed by this value.
    ///
    /// Only inconsistency penalizes; supporting ratings never "prove" a
    /// hypothesis, so `+` and `++` carry no weight. Callers exclude `N/A`
    /// cells before this is applied.
    pub fn penalty(&self) -> f64 {
        match self {
            RatingValue::StronglyInconsistent => 2.0,
            RatingValue::Inconsistent => 1.0,
            RatingValue::Neutral => 0.0,
            RatingValue::Consistent => 0.0,
            RatingValue::StronglyConsistent => 0.0,
            RatingValue::NotApplicable => 0.0,
        }
    }

    /// Signed position on the consistency scale, `None` for `N/A`.
    ///
    /// Negative positions are inconsistent, zero is neutral, positive
    /// positions are consistent; magnitude is the strength of the judgment.
    pub fn scale_position(&self) -> Option<i8> {
        match self {
            RatingValue::StronglyInconsistent => Some(-2),
            RatingValue::Inconsistent => Some(-1),
            RatingValue::Neutral => Some(0),
            RatingValue::Consistent => Some(1),
            RatingValue::StronglyConsistent => Some(2),
            RatingValue::NotApplicable => None,
        }
    }

    /// Whether this value disqualifies (counts toward inconsistency).
    pub fn is_inconsistent(&self) -> bool {
        matches!(
            self,
            RatingValue::StronglyInconsistent | RatingValue::Inconsistent
        )
    }

    /// Shift one step toward neutral; `N` and `N/A` are unchanged.
    pub fn soften(&self) -> RatingValue {
        match self {
            RatingValue::StronglyInconsistent => RatingValue::Inconsistent,
            RatingValue::Inconsistent => RatingValue::Neutral,
            RatingValue::Neutral => RatingValue::Neutral,
            RatingValue::Consistent => RatingValue::Neutral,
            RatingValue::StronglyConsistent => RatingValue::Consistent,
            RatingValue::NotApplicable => RatingValue::NotApplicable,
        }
    }

    /// Get the wire token for this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingValue::StronglyInconsistent => "--",
            RatingValue::Inconsistent => "-",
            RatingValue::Neutral => "N",
            RatingValue::Consistent => "+",
            RatingValue::StronglyConsistent => "++",
            RatingValue::NotApplicable => "N/A",
        }
    }
}

impl std::fmt::Display for RatingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RatingValue {
    type Err = String;

    // Exact tokens only; bad symbols are rejected at the boundary, never
    // coerced to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "--" => Ok(RatingValue::StronglyInconsistent),
            "-" => Ok(RatingValue::Inconsistent),
            "N" => Ok(RatingValue::Neutral),
            "+" => Ok(RatingValue::Consistent),
            "++" => Ok(RatingValue::StronglyConsistent),
            "N/A" => Ok(RatingValue::NotApplicable),
            _ => Err(format!("Unknown rating symbol: {}", s)),
        }
    }
}

/// Category of an evidence item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    /// Established fact.
    #[default]
    Fact,
    /// Witness or source testimony.
    Testimony,
    /// Documentary evidence.
    Document,
    /// Physical evidence.
    Physical,
    /// Circumstantial evidence.
    Circumstantial,
    /// Analytic inference.
    Inference,
}

impl EvidenceType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceType::Fact => "fact",
            EvidenceType::Testimony => "testimony",
            EvidenceType::Document => "document",
            EvidenceType::Physical => "physical",
            EvidenceType::Circumstantial => "circumstantial",
            EvidenceType::Inference => "inference",
        }
    }
}

impl std::fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EvidenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fact" => Ok(EvidenceType::Fact),
            "testimony" => Ok(EvidenceType::Testimony),
            "document" => Ok(EvidenceType::Document),
            "physical" => Ok(EvidenceType::Physical),
            "circumstantial" => Ok(EvidenceType::Circumstantial),
            "inference" => Ok(EvidenceType::Inference),
            _ => Err(format!("Unknown evidence type: {}", s)),
        }
    }
}

/// A candidate explanation under analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Unique hypothesis identifier.
    pub id: String,
    /// Short hypothesis statement.
    pub title: String,
    /// Longer description or rationale.
    pub description: String,
    /// Position in the analyst's display ordering.
    pub display_order: i32,
    /// Analyst or suggestion source that created the hypothesis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Whether this is the current lead hypothesis.
    pub is_lead: bool,
    /// When the hypothesis was created.
    pub created_at: DateTime<Utc>,
}

impl Hypothesis {
    /// Create a new hypothesis with a generated ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            display_order: 0,
            author: None,
            is_lead: false,
            created_at: Utc::now(),
        }
    }

    /// Use an externally assigned ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the display order.
    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Mark as the lead hypothesis.
    pub fn as_lead(mut self) -> Self {
        self.is_lead = true;
        self
    }
}

/// A piece of evidence rated against the hypotheses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    /// Unique evidence identifier.
    pub id: String,
    /// What the evidence says.
    pub description: String,
    /// Where the evidence came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Category of evidence.
    pub evidence_type: EvidenceType,
    /// Source credibility (0.0-1.0).
    pub credibility: f64,
    /// Relevance to the question (0.0-1.0).
    pub relevance: f64,
    /// Position in the analyst's display ordering.
    pub display_order: i32,
    /// When the evidence was recorded.
    pub created_at: DateTime<Utc>,
}

impl Evidence {
    /// Create a new evidence item with a generated ID.
    ///
    /// Credibility and relevance default to 1.0 (full weight).
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            source: None,
            evidence_type: EvidenceType::default(),
            credibility: 1.0,
            relevance: 1.0,
            display_order: 0,
            created_at: Utc::now(),
        }
    }

    /// Use an externally assigned ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the evidence type.
    pub fn with_type(mut self, evidence_type: EvidenceType) -> Self {
        self.evidence_type = evidence_type;
        self
    }

    /// Set the credibility weight.
    pub fn with_credibility(mut self, credibility: f64) -> Self {
        self.credibility = credibility;
        self
    }

    /// Set the relevance weight.
    pub fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = relevance;
        self
    }

    /// Set the display order.
    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }
}

/// One consistency judgment for an (evidence, hypothesis) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// Evidence being judged.
    pub evidence_id: String,
    /// Hypothesis being judged against.
    pub hypothesis_id: String,
    /// The consistency value.
    pub value: RatingValue,
    /// Analyst reasoning behind the judgment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Analyst confidence in the judgment (0.0-1.0).
    pub confidence: f64,
    /// Who made the judgment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// When the judgment was made.
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// Create a new rating with full confidence.
    pub fn new(
        evidence_id: impl Into<String>,
        hypothesis_id: impl Into<String>,
        value: RatingValue,
    ) -> Self {
        Self {
            evidence_id: evidence_id.into(),
            hypothesis_id: hypothesis_id.into(),
            value,
            reasoning: None,
            confidence: 1.0,
            author: None,
            created_at: Utc::now(),
        }
    }

    /// Set the confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the reasoning text.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Derived score for one hypothesis within a ranking run.
///
/// Scores are recomputed wholesale on every run and never patched
/// incrementally; a cached score set is stale as soon as any rating,
/// hypothesis, or evidence item changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisScore {
    /// Hypothesis this score belongs to.
    pub hypothesis_id: String,
    /// Dense rank, 1 = most plausible (fewest inconsistencies).
    pub rank: usize,
    /// Number of `-`/`--` ratings against the hypothesis.
    pub inconsistency_count: usize,
    /// Credibility- and confidence-weighted inconsistency sum.
    pub weighted_score: f64,
    /// Weighted score divided by the rated evidence count.
    pub normalized_score: f64,
    /// Number of non-N/A rated pairs contributing to the score.
    pub evidence_count: usize,
}

/// One in-memory analysis snapshot: hypotheses, evidence, and ratings.
///
/// Hypothesis insertion order is preserved and serves as the creation order
/// used to break ranking ties. All scorer functions take the matrix by
/// shared reference; callers serialize writes per matrix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Matrix {
    hypotheses: Vec<Hypothesis>,
    evidence: Vec<Evidence>,
    ratings: Vec<Rating>,
}

impl Matrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hypothesis. Rejects duplicate IDs.
    pub fn add_hypothesis(&mut self, hypothesis: Hypothesis) -> AchResult<()> {
        if hypothesis.id.is_empty() {
            return Err(AchError::validation("hypothesis.id", "must not be empty"));
        }
        if self.hypotheses.iter().any(|h| h.id == hypothesis.id) {
            return Err(AchError::validation(
                "hypothesis.id",
                format!("duplicate hypothesis id: {}", hypothesis.id),
            ));
        }
        self.hypotheses.push(hypothesis);
        Ok(())
    }

    /// Add an evidence item. Rejects duplicate IDs and out-of-range weights.
    pub fn add_evidence(&mut self, evidence: Evidence) -> AchResult<()> {
        if evidence.id.is_empty() {
            return Err(AchError::validation("evidence.id", "must not be empty"));
        }
        if self.evidence.iter().any(|e| e.id == evidence.id) {
            return Err(AchError::validation(
                "evidence.id",
                format!("duplicate evidence id: {}", evidence.id),
            ));
        }
        if !(0.0..=1.0).contains(&evidence.credibility) {
            return Err(AchError::validation(
                "evidence.credibility",
                "must be between 0 and 1",
            ));
        }
        if !(0.0..=1.0).contains(&evidence.relevance) {
            return Err(AchError::validation(
                "evidence.relevance",
                "must be between 0 and 1",
            ));
        }
        self.evidence.push(evidence);
        Ok(())
    }

    /// Upsert a rating for an (evidence, hypothesis) pair.
    ///
    /// At most one rating exists per pair; a second write for the same pair
    /// replaces the first (last-write-wins). References to unknown IDs are
    /// not-found errors, never silently created.
    pub fn rate(&mut self, rating: Rating) -> AchResult<()> {
        if !self.evidence.iter().any(|e| e.id == rating.evidence_id) {
            return Err(AchError::EvidenceNotFound {
                id: rating.evidence_id,
            });
        }
        if !self.hypotheses.iter().any(|h| h.id == rating.hypothesis_id) {
            return Err(AchError::HypothesisNotFound {
                id: rating.hypothesis_id,
            });
        }
        if !(0.0..=1.0).contains(&rating.confidence) {
            return Err(AchError::validation(
                "rating.confidence",
                "must be between 0 and 1",
            ));
        }
        if let Some(existing) = self
            .ratings
            .iter_mut()
            .find(|r| r.evidence_id == rating.evidence_id && r.hypothesis_id == rating.hypothesis_id)
        {
            *existing = rating;
        } else {
            self.ratings.push(rating);
        }
        Ok(())
    }

    /// Remove the rating for one pair, returning it if present.
    pub fn unrate(&mut self, evidence_id: &str, hypothesis_id: &str) -> Option<Rating> {
        let pos = self
            .ratings
            .iter()
            .position(|r| r.evidence_id == evidence_id && r.hypothesis_id == hypothesis_id)?;
        Some(self.ratings.remove(pos))
    }

    /// Remove a hypothesis and cascade-delete its ratings.
    pub fn remove_hypothesis(&mut self, id: &str) -> AchResult<Hypothesis> {
        let pos = self
            .hypotheses
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| AchError::HypothesisNotFound { id: id.to_string() })?;
        let removed = self.hypotheses.remove(pos);
        self.ratings.retain(|r| r.hypothesis_id != id);
        Ok(removed)
    }

    /// Remove an evidence item and cascade-delete its ratings.
    pub fn remove_evidence(&mut self, id: &str) -> AchResult<Evidence> {
        let pos = self
            .evidence
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AchError::EvidenceNotFound { id: id.to_string() })?;
        let removed = self.evidence.remove(pos);
        self.ratings.retain(|r| r.evidence_id != id);
        Ok(removed)
    }

    /// Look up the rating for one pair.
    pub fn rating(&self, evidence_id: &str, hypothesis_id: &str) -> Option<&Rating> {
        self.ratings
            .iter()
            .find(|r| r.evidence_id == evidence_id && r.hypothesis_id == hypothesis_id)
    }

    /// Look up an evidence item by ID.
    pub fn evidence_by_id(&self, id: &str) -> Option<&Evidence> {
        self.evidence.iter().find(|e| e.id == id)
    }

    /// Look up a hypothesis by ID.
    pub fn hypothesis_by_id(&self, id: &str) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| h.id == id)
    }

    /// Hypotheses in creation order.
    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    /// Evidence items in creation order.
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    /// All ratings currently in the matrix.
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Number of hypotheses.
    pub fn hypothesis_count(&self) -> usize {
        self.hypotheses.len()
    }

    /// Number of evidence items.
    pub fn evidence_count(&self) -> usize {
        self.evidence.len()
    }
}
