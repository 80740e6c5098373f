use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use db::DbHandle;

use crate::contract::model::{Enquiry, NewEnquiry};
use crate::domain::repo::EnquiriesRepository;

const INSERT: &str = "INSERT INTO enquiries (name, email, mobile, message) \
     VALUES ($1, $2, $3, $4) \
     RETURNING id, name, email, mobile, message, created_at";

const LIST: &str = "SELECT id, name, email, mobile, message, created_at \
     FROM enquiries ORDER BY created_at DESC, id DESC";

const DELETE: &str = "DELETE FROM enquiries WHERE id = $1 \
     RETURNING id, name, email, mobile, message, created_at";

#[derive(Debug, sqlx::FromRow)]
struct EnquiryRow {
    id: i64,
    name: String,
    email: String,
    mobile: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<EnquiryRow> for Enquiry {
    fn from(r: EnquiryRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            mobile: r.mobile,
            message: r.message,
            created_at: r.created_at,
        }
    }
}

pub struct SqlxEnquiriesRepository {
    db: Arc<DbHandle>,
}

impl SqlxEnquiriesRepository {
    pub fn new(db: Arc<DbHandle>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl EnquiriesRepository for SqlxEnquiriesRepository {
    async fn insert(&self, new: &NewEnquiry) -> anyhow::Result<Enquiry> {
        let row = db::with_pool!(self.db, pool => {
            sqlx::query_as::<_, EnquiryRow>(INSERT)
                .bind(new.name.as_deref())
                .bind(new.email.as_deref())
                .bind(new.mobile.as_deref())
                .bind(new.message.as_str())
                .fetch_one(pool)
                .await
        })
        .context("insert enquiry failed")?;
        Ok(row.into())
    }

    async fn list(&self) -> anyhow::Result<Vec<Enquiry>> {
        let rows = db::with_pool!(self.db, pool => {
            sqlx::query_as::<_, EnquiryRow>(LIST).fetch_all(pool).await
        })
        .context("list enquiries failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<Option<Enquiry>> {
        let row = db::with_pool!(self.db, pool => {
            sqlx::query_as::<_, EnquiryRow>(DELETE)
                .bind(id)
                .fetch_optional(pool)
                .await
        })
        .with_context(|| format!("delete enquiry {id} failed"))?;
        Ok(row.map(Into::into))
    }
}
