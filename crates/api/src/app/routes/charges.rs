use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    Json,
};

use portfolio_charges::{ChargeDefinition, Outcome};
use portfolio_core::{ChargeDefinitionId, ProductId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_charge_definitions(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_identifier): Path<String>,
) -> axum::response::Response {
    let product_id = ProductId::new(product_identifier);
    errors::outcome_to_response(Outcome::from_query(services.charges().list(&product_id)))
}

pub async fn get_charge_definition(
    Extension(services): Extension<Arc<AppServices>>,
    Path((product_identifier, charge_definition_identifier)): Path<(String, String)>,
) -> axum::response::Response {
    let product_id = ProductId::new(product_identifier);
    let charge_definition_id = ChargeDefinitionId::new(charge_definition_identifier);
    errors::outcome_to_response(Outcome::from_query(
        services.charges().get(&product_id, &charge_definition_id),
    ))
}

pub async fn create_charge_definition(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_identifier): Path<String>,
    body: Result<Json<ChargeDefinition>, JsonRejection>,
) -> axum::response::Response {
    let product_id = ProductId::new(product_identifier);
    if let Err(e) = services.charges().ensure_product_exists(&product_id) {
        return errors::outcome_to_response(Outcome::<()>::from_error(e));
    }
    let definition = match dto::charge_definition_body(body) {
        Ok(d) => d,
        Err(res) => return res,
    };

    errors::outcome_to_response(Outcome::<()>::from_command(
        services.charges().create(product_id, definition),
    ))
}

pub async fn change_charge_definition(
    Extension(services): Extension<Arc<AppServices>>,
    Path((product_identifier, charge_definition_identifier)): Path<(String, String)>,
    body: Result<Json<ChargeDefinition>, JsonRejection>,
) -> axum::response::Response {
    let product_id = ProductId::new(product_identifier);
    if let Err(e) = services.charges().ensure_product_exists(&product_id) {
        return errors::outcome_to_response(Outcome::<()>::from_error(e));
    }
    let definition = match dto::charge_definition_body(body) {
        Ok(d) => d,
        Err(res) => return res,
    };

    let charge_definition_id = ChargeDefinitionId::new(charge_definition_identifier);
    errors::outcome_to_response(Outcome::<()>::from_command(services.charges().change(
        product_id,
        &charge_definition_id,
        definition,
    )))
}

pub async fn delete_charge_definition(
    Extension(services): Extension<Arc<AppServices>>,
    Path((product_identifier, charge_definition_identifier)): Path<(String, String)>,
) -> axum::response::Response {
    let product_id = ProductId::new(product_identifier);
    let charge_definition_id = ChargeDefinitionId::new(charge_definition_identifier);
    errors::outcome_to_response(Outcome::<()>::from_command(
        services.charges().delete(product_id, charge_definition_id),
    ))
}
