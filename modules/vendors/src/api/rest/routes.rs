use axum::{
    routing::{get, put},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount `/api/vendors` and `/api/vendors/{id}` on `router`.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let vendors = Router::new()
        .route(
            "/api/vendors",
            get(handlers::list_vendors).post(handlers::create_vendor),
        )
        .route(
            "/api/vendors/{id}",
            put(handlers::update_vendor).delete(handlers::delete_vendor),
        )
        .layer(Extension(service));

    router.merge(vendors)
}
