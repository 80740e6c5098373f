use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{Enquiry, NewEnquiry};
use crate::domain::error::DomainError;
use crate::domain::repo::EnquiriesRepository;

#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn EnquiriesRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn EnquiriesRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "enquiries.service.create_enquiry", skip(self, new))]
    pub async fn create_enquiry(&self, new: NewEnquiry) -> Result<Enquiry, DomainError> {
        let enquiry = self
            .repo
            .insert(&new)
            .await
            .map_err(DomainError::database)?;
        info!(enquiry_id = enquiry.id, "Enquiry received");
        Ok(enquiry)
    }

    #[instrument(name = "enquiries.service.list_enquiries", skip(self))]
    pub async fn list_enquiries(&self) -> Result<Vec<Enquiry>, DomainError> {
        let enquiries = self.repo.list().await.map_err(DomainError::database)?;
        debug!("Listed {} enquiries", enquiries.len());
        Ok(enquiries)
    }

    #[instrument(
        name = "enquiries.service.delete_enquiry",
        skip(self),
        fields(enquiry_id = id)
    )]
    pub async fn delete_enquiry(&self, id: i64) -> Result<Enquiry, DomainError> {
        let enquiry = self
            .repo
            .delete(id)
            .await
            .map_err(DomainError::database)?
            .ok_or_else(|| DomainError::enquiry_not_found(id))?;
        info!("Enquiry deleted");
        Ok(enquiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryRepo {
        rows: Mutex<Vec<Enquiry>>,
        next_id: Mutex<i64>,
    }

    #[async_trait]
    impl EnquiriesRepository for InMemoryRepo {
        async fn insert(&self, new: &NewEnquiry) -> anyhow::Result<Enquiry> {
            let (Some(name), Some(email), Some(mobile)) =
                (new.name.clone(), new.email.clone(), new.mobile.clone())
            else {
                anyhow::bail!("NOT NULL constraint failed");
            };
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let enquiry = Enquiry {
                id: *next_id,
                name,
                email,
                mobile,
                message: new.message.clone(),
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(enquiry.clone());
            Ok(enquiry)
        }

        async fn list(&self) -> anyhow::Result<Vec<Enquiry>> {
            Ok(self.rows.lock().unwrap().iter().rev().cloned().collect())
        }

        async fn delete(&self, id: i64) -> anyhow::Result<Option<Enquiry>> {
            let mut rows = self.rows.lock().unwrap();
            let pos = rows.iter().position(|e| e.id == id);
            Ok(pos.map(|i| rows.remove(i)))
        }
    }

    fn jo() -> NewEnquiry {
        NewEnquiry {
            name: Some("Jo".into()),
            email: Some("jo@x.com".into()),
            mobile: Some("123".into()),
            message: "hi".into(),
        }
    }

    #[tokio::test]
    async fn create_then_delete_twice() {
        let svc = Service::new(Arc::new(InMemoryRepo::default()));

        let created = svc.create_enquiry(jo()).await.unwrap();
        assert_eq!(created.name, "Jo");
        assert_eq!(created.message, "hi");

        let deleted = svc.delete_enquiry(created.id).await.unwrap();
        assert_eq!(deleted, created);

        let err = svc.delete_enquiry(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::EnquiryNotFound { id } if id == created.id));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let svc = Service::new(Arc::new(InMemoryRepo::default()));
        let first = svc.create_enquiry(jo()).await.unwrap();
        let second = svc.create_enquiry(jo()).await.unwrap();

        let ids: Vec<i64> = svc
            .list_enquiries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn constraint_violation_is_database_error() {
        let svc = Service::new(Arc::new(InMemoryRepo::default()));
        let err = svc
            .create_enquiry(NewEnquiry {
                mobile: None,
                ..jo()
            })
            .await
            .unwrap_err();
        match err {
            DomainError::Database { message } => assert!(message.contains("NOT NULL")),
            other => panic!("expected Database error, got {other:?}"),
        }
        assert!(svc.list_enquiries().await.unwrap().is_empty());
    }
}
