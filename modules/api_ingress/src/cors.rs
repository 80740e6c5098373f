//! Browser origin allow-list.
//!
//! Two layers cooperate: [`origin_gate`] turns away requests whose `Origin`
//! is present but not listed, before any handler runs; the `tower-http`
//! [`CorsLayer`] underneath it answers preflights and adds the
//! `Access-Control-*` headers for listed origins.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Exact-match set of allowed origins (scheme, host and port).
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    origins: Vec<HeaderValue>,
}

impl OriginPolicy {
    /// Entries that cannot be sent as a header value are skipped with a warning.
    pub fn new<S: AsRef<str>>(origins: &[S]) -> Self {
        let origins = origins
            .iter()
            .map(|o| o.as_ref().trim())
            .filter(|o| !o.is_empty())
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = o, "ignoring invalid entry in cors.allowed_origins");
                    None
                }
            })
            .collect();
        Self { origins }
    }

    pub fn is_allowed(&self, origin: &HeaderValue) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.origins.clone()))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    }
}

/// Reject a request carrying an `Origin` that is not allow-listed.
/// Requests without `Origin` (curl, server-to-server) pass through.
pub async fn origin_gate(
    State(policy): State<Arc<OriginPolicy>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(origin) = req.headers().get(header::ORIGIN) else {
        return next.run(req).await;
    };

    if policy.is_allowed(origin) {
        tracing::debug!(origin = ?origin, "CORS origin allowed");
        return next.run(req).await;
    }

    tracing::warn!(
        origin = ?origin,
        method = %req.method(),
        path = %req.uri().path(),
        "Blocked by CORS"
    );
    StatusCode::FORBIDDEN.into_response()
}
