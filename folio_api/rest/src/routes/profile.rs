use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_profile_contracts::ProfileFeatureService;

use super::method_not_allowed;

pub fn router(service: Arc<impl ProfileFeatureService>) -> Router<()> {
    Router::new()
        .route(
            "/api/profile",
            routing::get(get_profile).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn get_profile(service: State<Arc<impl ProfileFeatureService>>) -> Response {
    let profile = service.get_profile();
    Json(&*profile).into_response()
}
