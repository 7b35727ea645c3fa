use thiserror::Error;

/// Engine-level errors
#[derive(Debug, Error)]
pub enum AchError {
    /// A request field failed validation; the field is named so callers can
    /// surface it.
    #[error("Validation failed: {field} - {reason}")]
    Validation {
        /// The offending field, e.g. `ratings[0].value`.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A rating or request referenced a hypothesis ID the matrix does not hold.
    #[error("Hypothesis not found: {id}")]
    HypothesisNotFound {
        /// The unknown hypothesis ID.
        id: String,
    },

    /// A rating or request referenced an evidence ID the matrix does not hold.
    #[error("Evidence not found: {id}")]
    EvidenceNotFound {
        /// The unknown evidence ID.
        id: String,
    },

    /// An analysis could not be completed.
    #[error("Analysis failed: {message}")]
    Analysis {
        /// What went wrong.
        message: String,
    },

    /// Request or response JSON could not be processed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AchError {
    /// Build a validation error for a named field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AchError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for engine operations
pub type AchResult<T> = Result<T, AchError>;
