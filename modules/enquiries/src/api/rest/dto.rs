use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{Enquiry, NewEnquiry};

/// REST DTO for an enquiry row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnquiryDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/enquiries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEnquiryReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a successful `DELETE /api/enquiries/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryDeletedDto {
    pub message: String,
    pub enquiry: EnquiryDto,
}

impl From<Enquiry> for EnquiryDto {
    fn from(e: Enquiry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            mobile: e.mobile,
            message: e.message,
            created_at: e.created_at,
        }
    }
}

impl From<CreateEnquiryReq> for NewEnquiry {
    fn from(req: CreateEnquiryReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            mobile: req.mobile,
            message: req.message.unwrap_or_default(),
        }
    }
}
