//! Error types for the timetable engine.
//!
//! All failures in this engine are values returned to the caller; nothing
//! here terminates the process. Malformed inputs surface synchronously as
//! [`EngineError`] and are never retried by the engine itself. Failures of
//! the external fetch collaborator are caught per-day by the cache's preload
//! and aggregated into [`crate::services::schedule_cache::PreloadFailure`]
//! values rather than appearing here.

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A malformed [`RecurrenceRequest`](crate::models::recurrence::RecurrenceRequest):
    /// no enabled day, inverted time or date range, empty subject/teacher set.
    /// Also raised for an invalid cache configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The grid resolver was given lesson instances but no bell periods, so
    /// no row exists to host any instance.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
