use super::*;

// ============================================================================
// RatingValue Tests
// ============================================================================

#[test]
fn test_rating_value_penalty() {
    assert_eq!(RatingValue::StronglyInconsistent.penalty(), 2.0);
    assert_eq!(RatingValue::Inconsistent.penalty(), 1.0);
    assert_eq!(RatingValue::Neutral.penalty(), 0.0);
    assert_eq!(RatingValue::Consistent.penalty(), 0.0);
    assert_eq!(RatingValue::StronglyConsistent.penalty(), 0.0);
    assert_eq!(RatingValue::NotApplicable.penalty(), 0.0);
}

#[test]
fn test_rating_value_scale_position() {
    assert_eq!(RatingValue::StronglyInconsistent.scale_position(), Some(-2));
    assert_eq!(RatingValue::Inconsistent.scale_position(), Some(-1));
    assert_eq!(RatingValue::Neutral.scale_position(), Some(0));
    assert_eq!(RatingValue::Consistent.scale_position(), Some(1));
    assert_eq!(RatingValue::StronglyConsistent.scale_position(), Some(2));
    assert_eq!(RatingValue::NotApplicable.scale_position(), None);
}

#[test]
fn test_rating_value_is_inconsistent() {
    assert!(RatingValue::StronglyInconsistent.is_inconsistent());
    assert!(RatingValue::Inconsistent.is_inconsistent());
    assert!(!RatingValue::Neutral.is_inconsistent());
    assert!(!RatingValue::Consistent.is_inconsistent());
    assert!(!RatingValue::StronglyConsistent.is_inconsistent());
    assert!(!RatingValue::NotApplicable.is_inconsistent());
}

#[test]
fn test_rating_value_soften() {
    assert_eq!(
        RatingValue::StronglyInconsistent.soften(),
        RatingValue::Inconsistent
    );
    assert_eq!(RatingValue::Inconsistent.soften(), RatingValue::Neutral);
    assert_eq!(RatingValue::Neutral.soften(), RatingValue::Neutral);
    assert_eq!(RatingValue::Consistent.soften(), RatingValue::Neutral);
    assert_eq!(
        RatingValue::StronglyConsistent.soften(),
        RatingValue::Consistent
    );
    assert_eq!(
        RatingValue::NotApplicable.soften(),
        RatingValue::NotApplicable
    );
}

#[test]
fn test_rating_value_display() {
    assert_eq!(format!("{}", RatingValue::StronglyInconsistent), "--");
    assert_eq!(format!("{}", RatingValue::Inconsistent), "-");
    assert_eq!(format!("{}", RatingValue::Neutral), "N");
    assert_eq!(format!("{}", RatingValue::Consistent), "+");
    assert_eq!(format!("{}", RatingValue::StronglyConsistent), "++");
    assert_eq!(format!("{}", RatingValue::NotApplicable), "N/A");
}

#[test]
fn test_rating_value_from_str_valid() {
    assert_eq!(
        "--".parse::<RatingValue>().unwrap(),
        RatingValue::StronglyInconsistent
    );
    assert_eq!("-".parse::<RatingValue>().unwrap(), RatingValue::Inconsistent);
    assert_eq!("N".parse::<RatingValue>().unwrap(), RatingValue::Neutral);
    assert_eq!("+".parse::<RatingValue>().unwrap(), RatingValue::Consistent);
    assert_eq!(
        "++".parse::<RatingValue>().unwrap(),
        RatingValue::StronglyConsistent
    );
    assert_eq!(
        "N/A".parse::<RatingValue>().unwrap(),
        RatingValue::NotApplicable
    );
}

#[test]
fn test_rating_value_from_str_rejects_unknown_tokens() {
    assert!("?".parse::<RatingValue>().is_err());
    assert!("+++".parse::<RatingValue>().is_err());
    assert!("".parse::<RatingValue>().is_err());
    // Exact tokens only - no case folding, no aliases.
    assert!("n".parse::<RatingValue>().is_err());
    assert!("n/a".parse::<RatingValue>().is_err());
    assert!("NA".parse::<RatingValue>().is_err());
}

#[test]
fn test_rating_value_serde_tokens() {
    assert_eq!(
        serde_json::to_string(&RatingValue::StronglyInconsistent).unwrap(),
        "\"--\""
    );
    assert_eq!(serde_json::to_string(&RatingValue::Neutral).unwrap(), "\"N\"");
    assert_eq!(
        serde_json::to_string(&RatingValue::NotApplicable).unwrap(),
        "\"N/A\""
    );

    let value: RatingValue = serde_json::from_str("\"++\"").unwrap();
    assert_eq!(value, RatingValue::StronglyConsistent);
    assert!(serde_json::from_str::<RatingValue>("\"strong\"").is_err());
}

// ============================================================================
// EvidenceType Tests
// ============================================================================

#[test]
fn test_evidence_type_display() {
    assert_eq!(format!("{}", EvidenceType::Fact), "fact");
    assert_eq!(format!("{}", EvidenceType::Testimony), "testimony");
    assert_eq!(format!("{}", EvidenceType::Document), "document");
    assert_eq!(format!("{}", EvidenceType::Physical), "physical");
    assert_eq!(format!("{}", EvidenceType::Circumstantial), "circumstantial");
    assert_eq!(format!("{}", EvidenceType::Inference), "inference");
}

#[test]
fn test_evidence_type_from_str() {
    assert_eq!("fact".parse::<EvidenceType>().unwrap(), EvidenceType::Fact);
    assert_eq!(
        "inference".parse::<EvidenceType>().unwrap(),
        EvidenceType::Inference
    );
    assert!("rumor".parse::<EvidenceType>().is_err());
}

#[test]
fn test_evidence_type_default() {
    assert_eq!(EvidenceType::default(), EvidenceType::Fact);
}

#[test]
fn test_evidence_type_serde() {
    assert_eq!(
        serde_json::to_string(&EvidenceType::Circumstantial).unwrap(),
        "\"circumstantial\""
    );
    let et: EvidenceType = serde_json::from_str("\"testimony\"").unwrap();
    assert_eq!(et, EvidenceType::Testimony);
}

// ============================================================================
// Hypothesis Tests
// ============================================================================

#[test]
fn test_hypothesis_new() {
    let h = Hypothesis::new("Deliberate action");
    assert!(!h.id.is_empty());
    assert_eq!(h.title, "Deliberate action");
    assert_eq!(h.description, "");
    assert_eq!(h.display_order, 0);
    assert!(h.author.is_none());
    assert!(!h.is_lead);
}

#[test]
fn test_hypothesis_builders() {
    let h = Hypothesis::new("H1")
        .with_id("hyp-1")
        .with_description("The event was planned")
        .with_display_order(3)
        .with_author("analyst-a")
        .as_lead();
    assert_eq!(h.id, "hyp-1");
    assert_eq!(h.description, "The event was planned");
    assert_eq!(h.display_order, 3);
    assert_eq!(h.author, Some("analyst-a".to_string()));
    assert!(h.is_lead);
}

// ============================================================================
// Evidence Tests
// ============================================================================

#[test]
fn test_evidence_new_defaults() {
    let e = Evidence::new("Intercepted message");
    assert!(!e.id.is_empty());
    assert_eq!(e.description, "Intercepted message");
    assert!(e.source.is_none());
    assert_eq!(e.evidence_type, EvidenceType::Fact);
    assert_eq!(e.credibility, 1.0);
    assert_eq!(e.relevance, 1.0);
}

#[test]
fn test_evidence_builders() {
    let e = Evidence::new("Witness statement")
        .with_id("ev-1")
        .with_source("field report")
        .with_type(EvidenceType::Testimony)
        .with_credibility(0.6)
        .with_relevance(0.9)
        .with_display_order(2);
    assert_eq!(e.id, "ev-1");
    assert_eq!(e.source, Some("field report".to_string()));
    assert_eq!(e.evidence_type, EvidenceType::Testimony);
    assert_eq!(e.credibility, 0.6);
    assert_eq!(e.relevance, 0.9);
    assert_eq!(e.display_order, 2);
}

// ============================================================================
// Rating Tests
// ============================================================================

#[test]
fn test_rating_new() {
    let r = Rating::new("ev-1", "hyp-1", RatingValue::Inconsistent);
    assert_eq!(r.evidence_id, "ev-1");
    assert_eq!(r.hypothesis_id, "hyp-1");
    assert_eq!(r.value, RatingValue::Inconsistent);
    assert_eq!(r.confidence, 1.0);
    assert!(r.reasoning.is_none());
    assert!(r.author.is_none());
}

#[test]
fn test_rating_builders() {
    let r = Rating::new("ev-1", "hyp-1", RatingValue::Neutral)
        .with_confidence(0.4)
        .with_reasoning("timing is ambiguous")
        .with_author("analyst-b");
    assert_eq!(r.confidence, 0.4);
    assert_eq!(r.reasoning, Some("timing is ambiguous".to_string()));
    assert_eq!(r.author, Some("analyst-b".to_string()));
}

// ============================================================================
// Matrix Tests
// ============================================================================

fn small_matrix() -> Matrix {
    let mut m = Matrix::new();
    m.add_hypothesis(Hypothesis::new("H1").with_id("h1")).unwrap();
    m.add_hypothesis(Hypothesis::new("H2").with_id("h2")).unwrap();
    m.add_evidence(Evidence::new("E1").with_id("e1")).unwrap();
    m.add_evidence(Evidence::new("E2").with_id("e2")).unwrap();
    m
}

#[test]
fn test_matrix_new_is_empty() {
    let m = Matrix::new();
    assert_eq!(m.hypothesis_count(), 0);
    assert_eq!(m.evidence_count(), 0);
    assert!(m.ratings().is_empty());
}

#[test]
fn test_matrix_add_hypothesis_rejects_duplicate_id() {
    let mut m = Matrix::new();
    m.add_hypothesis(Hypothesis::new("H1").with_id("h1")).unwrap();
    let err = m
        .add_hypothesis(Hypothesis::new("H1 again").with_id("h1"))
        .unwrap_err();
    assert!(matches!(err, AchError::Validation { ref field, .. } if field == "hypothesis.id"));
}

#[test]
fn test_matrix_add_evidence_rejects_out_of_range_weights() {
    let mut m = Matrix::new();
    let err = m
        .add_evidence(Evidence::new("E").with_id("e1").with_credibility(1.5))
        .unwrap_err();
    assert!(matches!(err, AchError::Validation { ref field, .. } if field == "evidence.credibility"));

    let err = m
        .add_evidence(Evidence::new("E").with_id("e1").with_relevance(-0.1))
        .unwrap_err();
    assert!(matches!(err, AchError::Validation { ref field, .. } if field == "evidence.relevance"));
}

#[test]
fn test_matrix_rate_and_lookup() {
    let mut m = small_matrix();
    m.rate(Rating::new("e1", "h1", RatingValue::Consistent)).unwrap();
    let r = m.rating("e1", "h1").unwrap();
    assert_eq!(r.value, RatingValue::Consistent);
    assert!(m.rating("e1", "h2").is_none());
}

#[test]
fn test_matrix_rate_upsert_is_last_write_wins() {
    let mut m = small_matrix();
    m.rate(Rating::new("e1", "h1", RatingValue::Consistent)).unwrap();
    m.rate(
        Rating::new("e1", "h1", RatingValue::StronglyInconsistent).with_confidence(0.7),
    )
    .unwrap();

    assert_eq!(m.ratings().len(), 1);
    let r = m.rating("e1", "h1").unwrap();
    assert_eq!(r.value, RatingValue::StronglyInconsistent);
    assert_eq!(r.confidence, 0.7);
}

#[test]
fn test_matrix_rate_unknown_ids_are_not_found() {
    let mut m = small_matrix();
    let err = m
        .rate(Rating::new("e-missing", "h1", RatingValue::Neutral))
        .unwrap_err();
    assert!(matches!(err, AchError::EvidenceNotFound { ref id } if id == "e-missing"));

    let err = m
        .rate(Rating::new("e1", "h-missing", RatingValue::Neutral))
        .unwrap_err();
    assert!(matches!(err, AchError::HypothesisNotFound { ref id } if id == "h-missing"));
}

#[test]
fn test_matrix_rate_rejects_out_of_range_confidence() {
    let mut m = small_matrix();
    let err = m
        .rate(Rating::new("e1", "h1", RatingValue::Neutral).with_confidence(2.0))
        .unwrap_err();
    assert!(matches!(err, AchError::Validation { ref field, .. } if field == "rating.confidence"));
}

#[test]
fn test_matrix_unrate() {
    let mut m = small_matrix();
    m.rate(Rating::new("e1", "h1", RatingValue::Neutral)).unwrap();
    let removed = m.unrate("e1", "h1").unwrap();
    assert_eq!(removed.value, RatingValue::Neutral);
    assert!(m.rating("e1", "h1").is_none());
    assert!(m.unrate("e1", "h1").is_none());
}

#[test]
fn test_matrix_remove_hypothesis_cascades_ratings() {
    let mut m = small_matrix();
    m.rate(Rating::new("e1", "h1", RatingValue::Inconsistent)).unwrap();
    m.rate(Rating::new("e2", "h1", RatingValue::Neutral)).unwrap();
    m.rate(Rating::new("e1", "h2", RatingValue::Consistent)).unwrap();

    m.remove_hypothesis("h1").unwrap();
    assert_eq!(m.hypothesis_count(), 1);
    assert_eq!(m.ratings().len(), 1);
    assert!(m.rating("e1", "h2").is_some());
}

#[test]
fn test_matrix_remove_evidence_cascades_ratings() {
    let mut m = small_matrix();
    m.rate(Rating::new("e1", "h1", RatingValue::Inconsistent)).unwrap();
    m.rate(Rating::new("e1", "h2", RatingValue::Consistent)).unwrap();
    m.rate(Rating::new("e2", "h2", RatingValue::Neutral)).unwrap();

    m.remove_evidence("e1").unwrap();
    assert_eq!(m.evidence_count(), 1);
    assert_eq!(m.ratings().len(), 1);
    assert!(m.rating("e2", "h2").is_some());
}

#[test]
fn test_matrix_remove_missing_is_not_found() {
    let mut m = small_matrix();
    assert!(matches!(
        m.remove_hypothesis("nope"),
        Err(AchError::HypothesisNotFound { .. })
    ));
    assert!(matches!(
        m.remove_evidence("nope"),
        Err(AchError::EvidenceNotFound { .. })
    ));
}

#[test]
fn test_matrix_preserves_creation_order() {
    let m = small_matrix();
    let ids: Vec<&str> = m.hypotheses().iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["h1", "h2"]);
}

#[test]
fn test_matrix_serde_round_trip() {
    let mut m = small_matrix();
    m.rate(Rating::new("e1", "h1", RatingValue::StronglyInconsistent))
        .unwrap();
    let json = serde_json::to_string(&m).unwrap();
    let back: Matrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back.hypothesis_count(), 2);
    assert_eq!(back.evidence_count(), 2);
    assert_eq!(
        back.rating("e1", "h1").unwrap().value,
        RatingValue::StronglyInconsistent
    );
}
