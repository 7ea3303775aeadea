//! Lifecycle error model.

use thiserror::Error;

use portfolio_commands::SubmissionError;
use portfolio_core::DomainError;

use crate::ports::LookupError;

/// Why a lifecycle operation did not go through.
///
/// - `Rejected`: deterministic rejection of the request given current state
///   (not found, bad request, conflict). Retrying the same request is pointless.
/// - `Lookup` / `Submission`: infrastructure failures unrelated to validation.
///
/// A rejected request never reaches the command gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error(transparent)]
    Rejected(#[from] DomainError),

    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("command submission failed: {0}")]
    Submission(#[from] SubmissionError),
}

impl LifecycleError {
    /// The domain rejection, when this is one.
    pub fn as_rejection(&self) -> Option<&DomainError> {
        match self {
            LifecycleError::Rejected(e) => Some(e),
            _ => None,
        }
    }
}
