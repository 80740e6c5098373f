use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Enquiry not found: {id}")]
    EnquiryNotFound { id: i64 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn enquiry_not_found(id: i64) -> Self {
        Self::EnquiryNotFound { id }
    }

    pub fn database(err: anyhow::Error) -> Self {
        Self::Database {
            message: format!("{err:#}"),
        }
    }
}
