//! Error taxonomy of a timetabling run.
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | `InvalidConfig` | validation | static data is malformed; nothing was solved |
//! | `Infeasible` | solver | no assignment satisfies every hard constraint |
//! | `SolverUnavailable` | solver | the backend failed for any other reason |
//! | `InconsistentAssignment` | decoder | the solver output has a job without exactly one start |
//!
//! None of these are retried.

use crate::validation::ValidationError;

/// Errors of a timetabling run.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Configuration failed validation.
    #[error("invalid configuration ({} problems): {}", .0.len(), summarize(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// No timetable satisfies every hard constraint.
    #[error("infeasible: no timetable satisfies every hard constraint")]
    Infeasible,

    /// The solver backend failed.
    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),

    /// A job has zero or several active starts in the solver output.
    #[error("inconsistent assignment: job '{job}' has {starts} active starts (expected 1)")]
    InconsistentAssignment {
        /// Offending job id.
        job: String,
        /// Number of start variables above 0.5.
        starts: usize,
    },
}

impl TimetableError {
    /// Whether this is the infeasibility outcome.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, TimetableError::Infeasible)
    }
}

impl From<Vec<ValidationError>> for TimetableError {
    fn from(errors: Vec<ValidationError>) -> Self {
        TimetableError::InvalidConfig(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for timetabling operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
