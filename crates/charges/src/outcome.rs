//! Uniform result vocabulary handed to the transport layer.
//!
//! Every lifecycle operation ends in exactly one [`Outcome`]. Transports map the
//! [`OutcomeKind`] to their own status codes; nothing in here knows about HTTP.

use portfolio_commands::{Accepted, SubmissionError};
use portfolio_core::DomainError;

use crate::error::LifecycleError;
use crate::ports::LookupError;

/// A failure of a collaborator rather than of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfrastructureError {
    Lookup(LookupError),
    Submission(SubmissionError),
}

impl InfrastructureError {
    pub fn message(&self) -> String {
        match self {
            InfrastructureError::Lookup(e) => e.to_string(),
            InfrastructureError::Submission(e) => e.to_string(),
        }
    }

    /// The command substrate is saturated or gone; retrying later may succeed.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            InfrastructureError::Submission(SubmissionError::QueueFull { .. } | SubmissionError::Closed)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ok(T),
    Accepted(Accepted),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    InfrastructureError(InfrastructureError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Ok,
    Accepted,
    NotFound,
    BadRequest,
    Conflict,
    InfrastructureError,
}

impl<T> Outcome<T> {
    pub fn from_query(result: Result<T, LifecycleError>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(e) => Outcome::from_error(e),
        }
    }

    pub fn from_command(result: Result<Accepted, LifecycleError>) -> Self {
        match result {
            Ok(accepted) => Outcome::Accepted(accepted),
            Err(e) => Outcome::from_error(e),
        }
    }

    pub fn from_error(error: LifecycleError) -> Self {
        match error {
            LifecycleError::Rejected(e) => match e {
                DomainError::NotFound(msg) => Outcome::NotFound(msg),
                DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                    Outcome::BadRequest(msg)
                }
                DomainError::Conflict(msg) => Outcome::Conflict(msg),
            },
            LifecycleError::Lookup(e) => Outcome::InfrastructureError(InfrastructureError::Lookup(e)),
            LifecycleError::Submission(e) => {
                Outcome::InfrastructureError(InfrastructureError::Submission(e))
            }
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Ok(_) => OutcomeKind::Ok,
            Outcome::Accepted(_) => OutcomeKind::Accepted,
            Outcome::NotFound(_) => OutcomeKind::NotFound,
            Outcome::BadRequest(_) => OutcomeKind::BadRequest,
            Outcome::Conflict(_) => OutcomeKind::Conflict,
            Outcome::InfrastructureError(_) => OutcomeKind::InfrastructureError,
        }
    }
}
