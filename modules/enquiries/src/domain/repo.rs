use crate::contract::model::{Enquiry, NewEnquiry};
use async_trait::async_trait;

/// Persistence port for enquiries. There is no update: an enquiry is
/// created, listed and eventually deleted.
#[async_trait]
pub trait EnquiriesRepository: Send + Sync {
    async fn insert(&self, new: &NewEnquiry) -> anyhow::Result<Enquiry>;
    /// All rows, newest first.
    async fn list(&self) -> anyhow::Result<Vec<Enquiry>>;
    /// Remove a row and return it. `None` when no row has this id.
    async fn delete(&self, id: i64) -> anyhow::Result<Option<Enquiry>>;
}
