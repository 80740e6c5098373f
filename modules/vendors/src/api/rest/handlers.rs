use std::sync::Arc;

use api_errors::ApiError;
use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use tracing::{debug, info};

use crate::api::rest::dto::{VendorDeletedDto, VendorDto, VendorReq};
use crate::api::rest::error::{map_domain_error, Operation, VENDOR_NOT_FOUND};
use crate::domain::service::Service;

/// An id that is not an integer cannot match any row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| {
        debug!(id = raw, "non-numeric vendor id");
        ApiError::not_found(VENDOR_NOT_FOUND)
    })
}

/// Create a vendor
pub async fn create_vendor(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<VendorReq>,
) -> Result<(StatusCode, Json<VendorDto>), ApiError> {
    info!("Creating vendor");

    let vendor = svc
        .create_vendor(req.into())
        .await
        .map_err(|e| map_domain_error(e, Operation::Add))?;
    Ok((StatusCode::CREATED, Json(vendor.into())))
}

/// List all vendors, newest first
pub async fn list_vendors(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<Vec<VendorDto>>, ApiError> {
    let vendors = svc
        .list_vendors()
        .await
        .map_err(|e| map_domain_error(e, Operation::Fetch))?;
    Ok(Json(vendors.into_iter().map(VendorDto::from).collect()))
}

/// Replace all mutable fields of a vendor
pub async fn update_vendor(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    Json(req): Json<VendorReq>,
) -> Result<Json<VendorDto>, ApiError> {
    let id = parse_id(&id)?;
    info!("Updating vendor {}", id);

    let vendor = svc
        .update_vendor(id, req.into())
        .await
        .map_err(|e| map_domain_error(e, Operation::Update))?;
    Ok(Json(vendor.into()))
}

/// Delete a vendor and echo the removed row
pub async fn delete_vendor(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<VendorDeletedDto>, ApiError> {
    let id = parse_id(&id)?;
    info!("Deleting vendor {}", id);

    let vendor = svc
        .delete_vendor(id)
        .await
        .map_err(|e| map_domain_error(e, Operation::Delete))?;
    Ok(Json(VendorDeletedDto {
        message: "Vendor deleted successfully".to_string(),
        vendor: vendor.into(),
    }))
}
