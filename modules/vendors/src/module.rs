use std::sync::Arc;

use db::DbHandle;
use tracing::info;

use crate::api::rest::routes;
use crate::domain::service::Service;
use crate::infra::storage::{ensure_schema, SqlxVendorsRepository};

/// Vendor directory: wires the sqlx repository into the domain service and
/// exposes its REST routes.
#[derive(Clone)]
pub struct VendorsModule {
    db: Arc<DbHandle>,
    service: Arc<Service>,
}

impl VendorsModule {
    pub fn new(db: Arc<DbHandle>) -> Self {
        let repo = SqlxVendorsRepository::new(db.clone());
        let service = Arc::new(Service::new(Arc::new(repo)));
        Self { db, service }
    }

    /// Create the backing table if it is missing.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        ensure_schema(&self.db).await
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!("Registering vendors REST routes");
        routes::register_routes(router, self.service.clone())
    }
}
