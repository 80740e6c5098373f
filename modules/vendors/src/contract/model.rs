use chrono::{DateTime, Utc};

/// A stored vendor row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub service: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// The five client-supplied columns, used for both insert and full replacement.
///
/// Required columns stay optional here: absent values are written as NULL and
/// the table's NOT NULL constraints decide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub service: Option<String>,
    pub description: String,
}
