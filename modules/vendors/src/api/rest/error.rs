use api_errors::ApiError;

use crate::domain::error::DomainError;

pub const VENDOR_NOT_FOUND: &str = "Vendor not found";

/// Client-facing message for a failed operation.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    Add,
    Fetch,
    Update,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Add => "Server error while adding vendor",
            Operation::Fetch => "Server error while fetching vendors",
            Operation::Update => "Server error while updating vendor",
            Operation::Delete => "Server error while deleting vendor",
        }
    }
}

/// Map a domain error to the `{error}` response for `op`.
pub fn map_domain_error(e: DomainError, op: Operation) -> ApiError {
    match e {
        DomainError::VendorNotFound { .. } => ApiError::not_found(VENDOR_NOT_FOUND),
        DomainError::Database { .. } => ApiError::internal(op.failure_message(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn not_found_ignores_operation() {
        let err = map_domain_error(DomainError::vendor_not_found(3), Operation::Delete);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), VENDOR_NOT_FOUND);
    }

    #[test]
    fn database_errors_get_operation_message() {
        for (op, msg) in [
            (Operation::Add, "Server error while adding vendor"),
            (Operation::Fetch, "Server error while fetching vendors"),
            (Operation::Update, "Server error while updating vendor"),
            (Operation::Delete, "Server error while deleting vendor"),
        ] {
            let err = map_domain_error(
                DomainError::database(anyhow::anyhow!("pool timed out")),
                op,
            );
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.to_string(), msg);
        }
    }
}
