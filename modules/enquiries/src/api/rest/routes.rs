use axum::{
    routing::{delete, get},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let enquiries = Router::new()
        .route(
            "/api/enquiries",
            get(handlers::list_enquiries).post(handlers::create_enquiry),
        )
        .route("/api/enquiries/{id}", delete(handlers::delete_enquiry))
        .layer(Extension(service));

    router.merge(enquiries)
}
