use crate::contract::model::{Vendor, VendorFields};
use async_trait::async_trait;

/// Port for the domain layer: persistence operations the domain needs.
/// Each method is a single statement; none of them needs a transaction.
#[async_trait]
pub trait VendorsRepository: Send + Sync {
    /// Insert a row and return it with the generated id and timestamp.
    async fn insert(&self, fields: &VendorFields) -> anyhow::Result<Vendor>;
    /// All rows, newest first.
    async fn list(&self) -> anyhow::Result<Vec<Vendor>>;
    /// Replace the five mutable columns. `None` when no row has this id.
    async fn update(&self, id: i64, fields: &VendorFields) -> anyhow::Result<Option<Vendor>>;
    /// Remove a row and return what was removed. `None` when no row has this id.
    async fn delete(&self, id: i64) -> anyhow::Result<Option<Vendor>>;
}
