use axum::extract::rejection::JsonRejection;
use axum::Json;

use portfolio_charges::ChargeDefinition;

use crate::app::errors;

/// Unwrap a JSON charge definition body and apply the structural field rules.
///
/// Any extraction failure (syntax, wrong types, missing fields, content type)
/// is a 400, as is a structurally invalid definition.
pub fn charge_definition_body(
    body: Result<Json<ChargeDefinition>, JsonRejection>,
) -> Result<ChargeDefinition, axum::response::Response> {
    let Json(definition) = body.map_err(|rejection| {
        errors::json_error(
            axum::http::StatusCode::BAD_REQUEST,
            "invalid_body",
            rejection.body_text(),
        )
    })?;

    definition
        .validate_structure()
        .map_err(errors::domain_error_to_response)?;

    Ok(definition)
}
