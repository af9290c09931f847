//! Error types for the generation pipeline

use thiserror::Error;

/// Failures surfaced by the planner core
///
/// Only [`PlannerError::GenerationFailed`] ever reaches a caller of
/// `Planner::generate`; malformed model output is recovered inside the
/// pipeline and cache failures degrade to a cache miss.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The model produced nothing for a task that cannot be defaulted
    #[error("generation failed for {task}: {reason}")]
    GenerationFailed { task: String, reason: String },

    /// Model text could not be repaired into the expected shape
    #[error("malformed response: {reason} (near: {preview:?})")]
    MalformedResponse { reason: String, preview: String },

    /// Cache gateway error
    #[error("cache error: {0}")]
    Cache(String),

    /// Batch scheduling error
    #[error("batch error: {0}")]
    Batch(String),

    /// JSON encoding/decoding error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlannerError {
    pub fn malformed(reason: impl Into<String>, text: &str) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
            preview: text.chars().take(120).collect(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}

impl From<rusqlite::Error> for PlannerError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Cache(err.to_string())
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
