//! sqlx-backed repository for the domain port.
//!
//! Every statement is written once with `$N` placeholders and runs unchanged
//! on PostgreSQL and SQLite; `RETURNING` hands back the affected row.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use db::DbHandle;

use crate::contract::model::{Vendor, VendorFields};
use crate::domain::repo::VendorsRepository;

const INSERT: &str = "INSERT INTO vendors (name, email, mobile, service, description) \
     VALUES ($1, $2, $3, $4, $5) \
     RETURNING id, name, email, mobile, service, description, created_at";

const LIST: &str = "SELECT id, name, email, mobile, service, description, created_at \
     FROM vendors ORDER BY created_at DESC, id DESC";

const UPDATE: &str = "UPDATE vendors \
     SET name = $1, email = $2, mobile = $3, service = $4, description = $5 \
     WHERE id = $6 \
     RETURNING id, name, email, mobile, service, description, created_at";

const DELETE: &str = "DELETE FROM vendors WHERE id = $1 \
     RETURNING id, name, email, mobile, service, description, created_at";

#[derive(Debug, sqlx::FromRow)]
struct VendorRow {
    id: i64,
    name: String,
    email: String,
    mobile: String,
    service: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<VendorRow> for Vendor {
    fn from(r: VendorRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            mobile: r.mobile,
            service: r.service,
            description: r.description,
            created_at: r.created_at,
        }
    }
}

/// Repository over the shared pool handle.
pub struct SqlxVendorsRepository {
    db: Arc<DbHandle>,
}

impl SqlxVendorsRepository {
    pub fn new(db: Arc<DbHandle>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl VendorsRepository for SqlxVendorsRepository {
    async fn insert(&self, f: &VendorFields) -> anyhow::Result<Vendor> {
        let row = db::with_pool!(self.db, pool => {
            sqlx::query_as::<_, VendorRow>(INSERT)
                .bind(f.name.as_deref())
                .bind(f.email.as_deref())
                .bind(f.mobile.as_deref())
                .bind(f.service.as_deref())
                .bind(f.description.as_str())
                .fetch_one(pool)
                .await
        })
        .context("insert vendor failed")?;
        Ok(row.into())
    }

    async fn list(&self) -> anyhow::Result<Vec<Vendor>> {
        let rows = db::with_pool!(self.db, pool => {
            sqlx::query_as::<_, VendorRow>(LIST).fetch_all(pool).await
        })
        .context("list vendors failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, f: &VendorFields) -> anyhow::Result<Option<Vendor>> {
        let row = db::with_pool!(self.db, pool => {
            sqlx::query_as::<_, VendorRow>(UPDATE)
                .bind(f.name.as_deref())
                .bind(f.email.as_deref())
                .bind(f.mobile.as_deref())
                .bind(f.service.as_deref())
                .bind(f.description.as_str())
                .bind(id)
                .fetch_optional(pool)
                .await
        })
        .with_context(|| format!("update vendor {id} failed"))?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<Option<Vendor>> {
        let row = db::with_pool!(self.db, pool => {
            sqlx::query_as::<_, VendorRow>(DELETE)
                .bind(id)
                .fetch_optional(pool)
                .await
        })
        .with_context(|| format!("delete vendor {id} failed"))?;
        Ok(row.map(Into::into))
    }
}
