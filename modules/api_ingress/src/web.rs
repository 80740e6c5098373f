use api_errors::ErrorBody;
use axum::{http::StatusCode, response::Json};

pub const BANNER: &str = "Buildezy Backend Running Successfully!";

pub async fn banner() -> &'static str {
    BANNER
}

pub async fn route_not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Route not found")))
}
