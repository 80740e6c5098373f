use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Vendor not found: {id}")]
    VendorNotFound { id: i64 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn vendor_not_found(id: i64) -> Self {
        Self::VendorNotFound { id }
    }

    /// Keeps the full context chain of the storage error.
    pub fn database(err: anyhow::Error) -> Self {
        Self::Database {
            message: format!("{err:#}"),
        }
    }
}
