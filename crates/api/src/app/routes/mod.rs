use axum::{routing::get, Router};

pub mod charges;
pub mod system;

/// Router for all resource endpoints.
///
/// Charge routes are registered with and without the trailing slash on the
/// collection path; both spellings are in use by clients.
pub fn router() -> Router {
    Router::new()
        .route(
            "/products/:product_identifier/charges",
            get(charges::list_charge_definitions).post(charges::create_charge_definition),
        )
        .route(
            "/products/:product_identifier/charges/",
            get(charges::list_charge_definitions).post(charges::create_charge_definition),
        )
        .route(
            "/products/:product_identifier/charges/:charge_definition_identifier",
            get(charges::get_charge_definition)
                .put(charges::change_charge_definition)
                .delete(charges::delete_charge_definition),
        )
}
