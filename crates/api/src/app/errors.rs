use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;

use portfolio_charges::{Outcome, OutcomeKind};
use portfolio_core::DomainError;

/// Status code for each outcome kind.
///
/// `InfrastructureError` is 500 unless the command substrate reports itself
/// unavailable, which is handled in [`outcome_to_response`].
pub fn status_for(kind: OutcomeKind) -> StatusCode {
    match kind {
        OutcomeKind::Ok => StatusCode::OK,
        OutcomeKind::Accepted => StatusCode::ACCEPTED,
        OutcomeKind::NotFound => StatusCode::NOT_FOUND,
        OutcomeKind::BadRequest => StatusCode::BAD_REQUEST,
        OutcomeKind::Conflict => StatusCode::CONFLICT,
        OutcomeKind::InfrastructureError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn outcome_to_response<T: Serialize>(outcome: Outcome<T>) -> axum::response::Response {
    let status = status_for(outcome.kind());
    match outcome {
        Outcome::Ok(body) => (status, axum::Json(body)).into_response(),
        Outcome::Accepted(accepted) => (status, axum::Json(accepted)).into_response(),
        Outcome::NotFound(msg) => json_error(status, "not_found", msg),
        Outcome::BadRequest(msg) => json_error(status, "bad_request", msg),
        Outcome::Conflict(msg) => json_error(status, "conflict", msg),
        Outcome::InfrastructureError(e) => {
            tracing::error!(error = %e.message(), "infrastructure failure");
            if e.is_unavailable() {
                json_error(StatusCode::SERVICE_UNAVAILABLE, "unavailable", e.message())
            } else {
                json_error(status, "infrastructure_error", e.message())
            }
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    outcome_to_response(Outcome::<()>::from_error(err.into()))
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_charges::{InfrastructureError, LookupError};
    use portfolio_commands::SubmissionError;

    #[test]
    fn kinds_map_to_documented_statuses() {
        assert_eq!(status_for(OutcomeKind::Ok), StatusCode::OK);
        assert_eq!(status_for(OutcomeKind::Accepted), StatusCode::ACCEPTED);
        assert_eq!(status_for(OutcomeKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(OutcomeKind::BadRequest), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(OutcomeKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(OutcomeKind::InfrastructureError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn saturated_queue_is_service_unavailable() {
        let full: Outcome<()> = Outcome::InfrastructureError(InfrastructureError::Submission(
            SubmissionError::QueueFull { capacity: 1 },
        ));
        assert_eq!(outcome_to_response(full).status(), StatusCode::SERVICE_UNAVAILABLE);

        let lookup: Outcome<()> = Outcome::InfrastructureError(InfrastructureError::Lookup(
            LookupError::unavailable("charge store", "down"),
        ));
        assert_eq!(
            outcome_to_response(lookup).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn structural_errors_are_bad_requests() {
        let res = domain_error_to_response(DomainError::invalid_id("ChargeDefinitionId: must not be empty"));
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
