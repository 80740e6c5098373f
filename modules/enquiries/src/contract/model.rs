use chrono::{DateTime, Utc};

/// A stored enquiry row. Enquiries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied columns for a new enquiry; `None` is written as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEnquiry {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub message: String,
}
