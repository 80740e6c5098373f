use api_errors::ApiError;

use crate::domain::error::DomainError;

pub const ENQUIRY_NOT_FOUND: &str = "Enquiry not found";

/// Client-facing message for a failed operation.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    Add,
    Fetch,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Add => "Server error while adding enquiry",
            Operation::Fetch => "Server error while fetching enquiries",
            Operation::Delete => "Server error while deleting enquiry",
        }
    }
}

/// Map a domain error to the `{error}` response for `op`.
pub fn map_domain_error(e: DomainError, op: Operation) -> ApiError {
    match e {
        DomainError::EnquiryNotFound { .. } => ApiError::not_found(ENQUIRY_NOT_FOUND),
        DomainError::Database { .. } => ApiError::internal(op.failure_message(), e),
    }
}
