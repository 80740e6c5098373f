use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{Vendor, VendorFields};

/// REST DTO for a vendor row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VendorDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub service: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/vendors` and `PUT /api/vendors/{id}`.
///
/// Nothing is validated here; missing values are stored as NULL and
/// rejected by the database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of a successful `DELETE /api/vendors/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorDeletedDto {
    pub message: String,
    pub vendor: VendorDto,
}

impl From<Vendor> for VendorDto {
    fn from(v: Vendor) -> Self {
        Self {
            id: v.id,
            name: v.name,
            email: v.email,
            mobile: v.mobile,
            service: v.service,
            description: v.description,
            created_at: v.created_at,
        }
    }
}

impl From<VendorReq> for VendorFields {
    fn from(req: VendorReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            mobile: req.mobile,
            service: req.service,
            // null and "" both mean "no description"
            description: req.description.unwrap_or_default(),
        }
    }
}
