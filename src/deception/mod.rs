//! Deception risk assessment - MOM/POP/MOSES/EVE checklist aggregation.
//!
//! Four structured checklists assess whether a source may be deceiving:
//! Motive-Opportunity-Means (MOM), Past-Opposition-Practices (POP),
//! Manipulability-of-Sources (MOSES), and Evaluation-of-Evidence (EVE).
//! All four share one shape - a list of indicators averaged into a
//! checklist score - and differ only in their static question sets and the
//! fixed weight each contributes to the overall risk signal.
//!
//! Recalculation is explicit: editing indicators never recomputes anything
//! by itself. A [`DeceptionAssessment::recalculate`] call produces a whole
//! new summary, and exposes a risk-level change so the external credibility
//! collaborator can re-weight anything linked to the source.

mod questions;

pub use questions::{EVE_QUESTIONS, MOM_QUESTIONS, MOSES_QUESTIONS, POP_QUESTIONS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// The four deception checklist families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistType {
    /// Motive, Opportunity, and Means.
    Mom,
    /// Past Opposition Practices.
    Pop,
    /// Manipulability of Sources.
    Moses,
    /// Evaluation of Evidence.
    Eve,
}

impl ChecklistType {
    /// All checklist types, in weight order.
    pub const ALL: [ChecklistType; 4] = [
        ChecklistType::Mom,
        ChecklistType::Eve,
        ChecklistType::Moses,
        ChecklistType::Pop,
    ];

    /// Fixed weight this checklist contributes to the overall score.
    ///
    /// The weights sum to 1.0; an absent checklist contributes 0 at its
    /// full weight, so an unassessed family pulls the overall risk down
    /// rather than being ignored.
    pub fn weight(&self) -> f64 {
        match self {
            ChecklistType::Mom => 0.35,
            ChecklistType::Eve => 0.25,
            ChecklistType::Moses => 0.25,
            ChecklistType::Pop => 0.15,
        }
    }

    /// Standard elicitation questions for this checklist.
    pub fn questions(&self) -> &'static [&'static str] {
        match self {
            ChecklistType::Mom => MOM_QUESTIONS,
            ChecklistType::Pop => POP_QUESTIONS,
            ChecklistType::Moses => MOSES_QUESTIONS,
            ChecklistType::Eve => EVE_QUESTIONS,
        }
    }

    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistType::Mom => "mom",
            ChecklistType::Pop => "pop",
            ChecklistType::Moses => "moses",
            ChecklistType::Eve => "eve",
        }
    }
}

impl std::fmt::Display for ChecklistType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChecklistType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mom" => Ok(ChecklistType::Mom),
            "pop" => Ok(ChecklistType::Pop),
            "moses" => Ok(ChecklistType::Moses),
            "eve" => Ok(ChecklistType::Eve),
            _ => Err(format!("Unknown checklist type: {}", s)),
        }
    }
}

/// How strongly an indicator points at deception.
///
/// The ordinal tokens map to fixed numeric values; `none` scores 0 and is
/// included in checklist means, so an unworked checklist trends low instead
/// of disappearing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStrength {
    /// Not assessed or no support (0).
    #[default]
    None,
    /// Weak support (25).
    Weak,
    /// Moderate support (50).
    Moderate,
    /// Strong support (75).
    Strong,
    /// Conclusive support (100).
    Conclusive,
}

impl IndicatorStrength {
    /// Numeric value used in checklist means.
    pub fn value(&self) -> f64 {
        match self {
            IndicatorStrength::None => 0.0,
            IndicatorStrength::Weak => 25.0,
            IndicatorStrength::Moderate => 50.0,
            IndicatorStrength::Strong => 75.0,
            IndicatorStrength::Conclusive => 100.0,
        }
    }

    /// Get the strength name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorStrength::None => "none",
            IndicatorStrength::Weak => "weak",
            IndicatorStrength::Moderate => "moderate",
            IndicatorStrength::Strong => "strong",
            IndicatorStrength::Conclusive => "conclusive",
        }
    }
}

impl std::fmt::Display for IndicatorStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IndicatorStrength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(IndicatorStrength::None),
            "weak" => Ok(IndicatorStrength::Weak),
            "moderate" => Ok(IndicatorStrength::Moderate),
            "strong" => Ok(IndicatorStrength::Strong),
            "conclusive" => Ok(IndicatorStrength::Conclusive),
            _ => Err(format!("Unknown indicator strength: {}", s)),
        }
    }
}

/// Risk bucket for a deception score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Score in [0, 20).
    Minimal,
    /// Score in [20, 40).
    Low,
    /// Score in [40, 60).
    Moderate,
    /// Score in [60, 80).
    High,
    /// Score in [80, 100].
    Critical,
}

impl RiskLevel {
    /// Bucket a 0-100 score. Exactly 100 classifies critical.
    pub fn from_score(score: f64) -> Self {
        if score < 20.0 {
            RiskLevel::Minimal
        } else if score < 40.0 {
            RiskLevel::Low
        } else if score < 60.0 {
            RiskLevel::Moderate
        } else if score < 80.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Minimal => "minimal",
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One answered (or not-yet-answered) checklist question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeceptionIndicator {
    /// Unique indicator identifier.
    pub id: String,
    /// Which checklist family the indicator belongs to.
    pub checklist_type: ChecklistType,
    /// The elicitation question being answered.
    pub question: String,
    /// Assessed strength; `none` until worked.
    pub strength: IndicatorStrength,
    /// Analyst confidence in the strength judgment (0.0-1.0).
    pub confidence: f64,
    /// Evidence items supporting the judgment.
    #[serde(default)]
    pub evidence_refs: Vec<String>,
    /// Analyst notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the indicator was created.
    pub created_at: DateTime<Utc>,
}

impl DeceptionIndicator {
    /// Create an unassessed indicator for a question.
    pub fn new(checklist_type: ChecklistType, question: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            checklist_type,
            question: question.into(),
            strength: IndicatorStrength::None,
            confidence: 1.0,
            evidence_refs: Vec::new(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Set the assessed strength.
    pub fn with_strength(mut self, strength: IndicatorStrength) -> Self {
        self.strength = strength;
        self
    }

    /// Set the confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Add a supporting evidence reference.
    pub fn with_evidence_ref(mut self, evidence_id: impl Into<String>) -> Self {
        self.evidence_refs.push(evidence_id.into());
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// One checklist instance: a typed list of indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeceptionChecklist {
    /// Unique checklist identifier.
    pub id: String,
    /// Which family this checklist instance is.
    pub checklist_type: ChecklistType,
    /// The indicators being worked.
    pub indicators: Vec<DeceptionIndicator>,
    /// When the checklist was created.
    pub created_at: DateTime<Utc>,
}

impl DeceptionChecklist {
    /// Create an empty checklist.
    pub fn new(checklist_type: ChecklistType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            checklist_type,
            indicators: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a checklist seeded with one unassessed indicator per standard
    /// question for its family.
    pub fn standard(checklist_type: ChecklistType) -> Self {
        let mut checklist = Self::new(checklist_type);
        for question in checklist_type.questions() {
            checklist
                .indicators
                .push(DeceptionIndicator::new(checklist_type, *question));
        }
        checklist
    }

    /// Add an indicator.
    pub fn add_indicator(&mut self, indicator: DeceptionIndicator) {
        self.indicators.push(indicator);
    }

    /// Arithmetic mean of indicator strengths, 0-100.
    ///
    /// Unassessed (`none`) indicators count at 0 rather than being dropped,
    /// so an incomplete checklist trends low. An empty checklist scores 0.
    pub fn overall_score(&self) -> f64 {
        if self.indicators.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.indicators.iter().map(|i| i.strength.value()).sum();
        sum / self.indicators.len() as f64
    }

    /// Risk bucket for this checklist alone.
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.overall_score())
    }
}

/// Score summary for one checklist within an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistScore {
    /// Checklist family.
    pub checklist_type: ChecklistType,
    /// Mean indicator strength, 0-100.
    pub overall_score: f64,
    /// Risk bucket for this checklist.
    pub risk_level: RiskLevel,
    /// Number of indicators in the checklist.
    pub indicator_count: usize,
}

/// Atomic result of one assessment recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeceptionSummary {
    /// Assessment the summary belongs to.
    pub assessment_id: String,
    /// Per-checklist scores for the checklists that exist.
    pub checklists: Vec<ChecklistScore>,
    /// Weighted overall score, 0-100.
    pub overall_score: f64,
    /// Risk bucket for the overall score.
    pub risk_level: RiskLevel,
    /// Risk level produced by the previous recalculation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_risk_level: Option<RiskLevel>,
    /// Whether the risk level moved since the previous recalculation.
    ///
    /// The external credibility system re-weights linked assessments when
    /// this is set; the engine only reports the change.
    pub risk_level_changed: bool,
}

/// A source deception assessment holding up to one checklist per family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeceptionAssessment {
    /// Unique assessment identifier.
    pub id: String,
    /// Attached checklists, at most one per family.
    checklists: Vec<DeceptionChecklist>,
    /// Risk level from the last recalculation.
    last_risk_level: Option<RiskLevel>,
    /// When the assessment was created.
    pub created_at: DateTime<Utc>,
}

impl Default for DeceptionAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl DeceptionAssessment {
    /// Create an empty assessment with a generated ID.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            checklists: Vec::new(),
            last_risk_level: None,
            created_at: Utc::now(),
        }
    }

    /// Use an externally assigned ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach a checklist, replacing any existing one of the same family.
    pub fn set_checklist(&mut self, checklist: DeceptionChecklist) {
        if let Some(existing) = self
            .checklists
            .iter_mut()
            .find(|c| c.checklist_type == checklist.checklist_type)
        {
            *existing = checklist;
        } else {
            self.checklists.push(checklist);
        }
    }

    /// Look up the checklist for a family.
    pub fn checklist(&self, checklist_type: ChecklistType) -> Option<&DeceptionChecklist> {
        self.checklists
            .iter()
            .find(|c| c.checklist_type == checklist_type)
    }

    /// Attached checklists.
    pub fn checklists(&self) -> &[DeceptionChecklist] {
        &self.checklists
    }

    /// Risk level from the last recalculation, if one has run.
    pub fn last_risk_level(&self) -> Option<RiskLevel> {
        self.last_risk_level
    }

    /// Recompute all checklist scores and the weighted overall score.
    ///
    /// Explicit on purpose: indicator edits never trigger this. The call is
    /// idempotent on unchanged input, replaces the whole summary atomically,
    /// and substitutes 0 for any family with no checklist yet.
    pub fn recalculate(&mut self) -> DeceptionSummary {
        let mut overall_score = 0.0;
        let mut checklist_scores = Vec::with_capacity(self.checklists.len());

        for checklist_type in ChecklistType::ALL {
            let score = match self.checklist(checklist_type) {
                Some(checklist) => {
                    let score = checklist.overall_score();
                    checklist_scores.push(ChecklistScore {
                        checklist_type,
                        overall_score: score,
                        risk_level: RiskLevel::from_score(score),
                        indicator_count: checklist.indicators.len(),
                    });
                    score
                }
                None => 0.0,
            };
            debug!(
                checklist = %checklist_type,
                score,
                weight = checklist_type.weight(),
                "Aggregated checklist"
            );
            overall_score += checklist_type.weight() * score;
        }

        let risk_level = RiskLevel::from_score(overall_score);
        let previous_risk_level = self.last_risk_level;
        let risk_level_changed = previous_risk_level.is_some_and(|p| p != risk_level);
        self.last_risk_level = Some(risk_level);

        info!(
            assessment_id = %self.id,
            overall_score,
            risk_level = %risk_level,
            risk_level_changed,
            "Deception assessment recalculated"
        );

        DeceptionSummary {
            assessment_id: self.id.clone(),
            checklists: checklist_scores,
            overall_score,
            risk_level,
            previous_risk_level,
            risk_level_changed,
        }
    }
}
