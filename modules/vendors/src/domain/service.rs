use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{Vendor, VendorFields};
use crate::domain::error::DomainError;
use crate::domain::repo::VendorsRepository;

/// Domain service for the vendor directory.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn VendorsRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn VendorsRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "vendors.service.create_vendor", skip(self, input))]
    pub async fn create_vendor(&self, input: VendorFields) -> Result<Vendor, DomainError> {
        let vendor = self
            .repo
            .insert(&input)
            .await
            .map_err(DomainError::database)?;
        info!(vendor_id = vendor.id, "Vendor created");
        Ok(vendor)
    }

    #[instrument(name = "vendors.service.list_vendors", skip(self))]
    pub async fn list_vendors(&self) -> Result<Vec<Vendor>, DomainError> {
        let vendors = self.repo.list().await.map_err(DomainError::database)?;
        debug!("Listed {} vendors", vendors.len());
        Ok(vendors)
    }

    #[instrument(
        name = "vendors.service.update_vendor",
        skip(self, input),
        fields(vendor_id = id)
    )]
    pub async fn update_vendor(&self, id: i64, input: VendorFields) -> Result<Vendor, DomainError> {
        let vendor = self
            .repo
            .update(id, &input)
            .await
            .map_err(DomainError::database)?
            .ok_or_else(|| DomainError::vendor_not_found(id))?;
        info!("Vendor updated");
        Ok(vendor)
    }

    #[instrument(name = "vendors.service.delete_vendor", skip(self), fields(vendor_id = id))]
    pub async fn delete_vendor(&self, id: i64) -> Result<Vendor, DomainError> {
        let vendor = self
            .repo
            .delete(id)
            .await
            .map_err(DomainError::database)?
            .ok_or_else(|| DomainError::vendor_not_found(id))?;
        info!("Vendor deleted");
        Ok(vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Vec-backed repository; `fail` makes every call return an error.
    #[derive(Default)]
    struct FakeRepo {
        rows: Mutex<Vec<Vendor>>,
        fail: bool,
    }

    impl FakeRepo {
        fn check(&self) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }
    }

    fn materialize(id: i64, f: &VendorFields) -> anyhow::Result<Vendor> {
        let required = |v: &Option<String>, col: &str| {
            v.clone()
                .ok_or_else(|| anyhow::anyhow!("null value in column \"{col}\""))
        };
        Ok(Vendor {
            id,
            name: required(&f.name, "name")?,
            email: required(&f.email, "email")?,
            mobile: required(&f.mobile, "mobile")?,
            service: required(&f.service, "service")?,
            description: f.description.clone(),
            created_at: Utc::now(),
        })
    }

    #[async_trait]
    impl VendorsRepository for FakeRepo {
        async fn insert(&self, fields: &VendorFields) -> anyhow::Result<Vendor> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let id = rows.iter().map(|v| v.id).max().unwrap_or(0) + 1;
            let vendor = materialize(id, fields)?;
            rows.push(vendor.clone());
            Ok(vendor)
        }

        async fn list(&self) -> anyhow::Result<Vec<Vendor>> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap().clone();
            rows.reverse();
            Ok(rows)
        }

        async fn update(&self, id: i64, fields: &VendorFields) -> anyhow::Result<Option<Vendor>> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|v| v.id == id) else {
                return Ok(None);
            };
            let created_at = row.created_at;
            *row = Vendor {
                created_at,
                ..materialize(id, fields)?
            };
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: i64) -> anyhow::Result<Option<Vendor>> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let pos = rows.iter().position(|v| v.id == id);
            Ok(pos.map(|i| rows.remove(i)))
        }
    }

    fn fields(name: &str) -> VendorFields {
        VendorFields {
            name: Some(name.to_string()),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            mobile: Some("9876543210".to_string()),
            service: Some("Plumbing".to_string()),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn update_keeps_id_and_created_at() {
        let svc = Service::new(Arc::new(FakeRepo::default()));
        let created = svc.create_vendor(fields("Asha")).await.unwrap();

        let mut patch = fields("Asha Builders");
        patch.description = "Residential work".into();
        let updated = svc.update_vendor(created.id, patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Asha Builders");
        assert_eq!(updated.description, "Residential work");
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let svc = Service::new(Arc::new(FakeRepo::default()));

        let err = svc.update_vendor(42, fields("Ghost")).await.unwrap_err();
        assert!(matches!(err, DomainError::VendorNotFound { id: 42 }));

        let err = svc.delete_vendor(42).await.unwrap_err();
        assert!(matches!(err, DomainError::VendorNotFound { id: 42 }));

        assert!(svc.list_vendors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_returns_removed_row() {
        let svc = Service::new(Arc::new(FakeRepo::default()));
        let a = svc.create_vendor(fields("A")).await.unwrap();
        let b = svc.create_vendor(fields("B")).await.unwrap();

        let removed = svc.delete_vendor(a.id).await.unwrap();
        assert_eq!(removed, a);

        let remaining = svc.list_vendors().await.unwrap();
        assert_eq!(remaining, vec![b]);
    }

    #[tokio::test]
    async fn storage_failures_become_database_errors() {
        let svc = Service::new(Arc::new(FakeRepo {
            fail: true,
            ..Default::default()
        }));

        let err = svc.list_vendors().await.unwrap_err();
        match err {
            DomainError::Database { message } => assert!(message.contains("connection refused")),
            other => panic!("expected Database error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_required_field_is_a_database_error() {
        let svc = Service::new(Arc::new(FakeRepo::default()));
        let mut incomplete = fields("NoMobile");
        incomplete.mobile = None;

        let err = svc.create_vendor(incomplete).await.unwrap_err();
        assert!(matches!(err, DomainError::Database { .. }));
    }
}
