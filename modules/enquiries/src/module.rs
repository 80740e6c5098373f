use std::sync::Arc;

use db::DbHandle;
use tracing::info;

use crate::api::rest::routes;
use crate::domain::service::Service;
use crate::infra::storage::{ensure_schema, SqlxEnquiriesRepository};

/// Enquiry inbox: sqlx repository, domain service and REST routes.
#[derive(Clone)]
pub struct EnquiriesModule {
    db: Arc<DbHandle>,
    service: Arc<Service>,
}

impl EnquiriesModule {
    pub fn new(db: Arc<DbHandle>) -> Self {
        let repo = SqlxEnquiriesRepository::new(db.clone());
        let service = Arc::new(Service::new(Arc::new(repo)));
        Self { db, service }
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        ensure_schema(&self.db).await
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!("Registering enquiries REST routes");
        routes::register_routes(router, self.service.clone())
    }
}
