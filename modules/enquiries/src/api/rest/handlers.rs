use std::sync::Arc;

use api_errors::ApiError;
use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use tracing::{debug, info};

use crate::api::rest::dto::{CreateEnquiryReq, EnquiryDeletedDto, EnquiryDto};
use crate::api::rest::error::{map_domain_error, Operation, ENQUIRY_NOT_FOUND};
use crate::domain::service::Service;

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| {
        debug!(id = raw, "non-numeric enquiry id");
        ApiError::not_found(ENQUIRY_NOT_FOUND)
    })
}

/// Submit an enquiry
pub async fn create_enquiry(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateEnquiryReq>,
) -> Result<(StatusCode, Json<EnquiryDto>), ApiError> {
    info!("Creating enquiry");

    let enquiry = svc
        .create_enquiry(req.into())
        .await
        .map_err(|e| map_domain_error(e, Operation::Add))?;
    Ok((StatusCode::CREATED, Json(enquiry.into())))
}

/// List all enquiries, newest first
pub async fn list_enquiries(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Vec<EnquiryDto>>, ApiError> {
    let enquiries = svc
        .list_enquiries()
        .await
        .map_err(|e| map_domain_error(e, Operation::Fetch))?;
    Ok(Json(enquiries.into_iter().map(EnquiryDto::from).collect()))
}

/// Delete an enquiry and echo the removed row
pub async fn delete_enquiry(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<EnquiryDeletedDto>, ApiError> {
    let id = parse_id(&id)?;
    info!("Deleting enquiry {}", id);

    let enquiry = svc
        .delete_enquiry(id)
        .await
        .map_err(|e| map_domain_error(e, Operation::Delete))?;
    Ok(Json(EnquiryDeletedDto {
        message: "Enquiry deleted successfully".to_string(),
        enquiry: enquiry.into(),
    }))
}
