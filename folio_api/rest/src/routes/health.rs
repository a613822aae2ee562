use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::ContactFeatureService;
use serde::Serialize;

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    contact: bool,
}

/// An unconfigured contact relay is reported but does not fail the check.
async fn health(service: State<Arc<impl ContactFeatureService>>) -> Response {
    let response = HealthResponse {
        http: true,
        contact: service.is_configured(),
    };

    Json(response).into_response()
}
