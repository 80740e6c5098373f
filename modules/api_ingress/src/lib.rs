//! HTTP front door of the Buildezy backend.
//!
//! [`ApiIngress`] wraps the resource routers with the shared middleware stack
//! (request ids, tracing, origin allow-list, body limit), adds the banner and
//! the JSON 404 fallback, and serves the result until cancelled.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
};

mod config;
pub mod cors;
pub mod request_id;
pub mod web;

pub use config::ApiIngressConfig;
pub use cors::OriginPolicy;

pub struct ApiIngress {
    config: ApiIngressConfig,
    policy: Arc<OriginPolicy>,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        let policy = Arc::new(OriginPolicy::new(&config.allowed_origins));
        if policy.is_empty() {
            tracing::warn!("cors.allowed_origins is empty; every browser request will be rejected");
        }
        Self { config, policy }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Wrap `routes` with the banner, the 404 fallback and the middleware stack.
    pub fn build_router(&self, routes: Router) -> Router {
        let router = Router::new()
            .route("/", get(web::banner))
            .merge(routes)
            .fallback(web::route_not_found)
            .method_not_allowed_fallback(web::route_not_found);

        // Each `.layer` wraps everything added before it, so the stack is
        // listed innermost first. Request order is the reverse:
        // SetRequestId -> PropagateRequestId -> stash_request_id -> Trace
        //   -> origin gate -> CORS -> BodyLimit -> routes
        router
            .layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes))
            .layer(self.policy.cors_layer())
            .layer(from_fn_with_state(self.policy.clone(), cors::origin_gate))
            .layer(request_id::trace_layer())
            .layer(from_fn(request_id::stash_request_id))
            .layer(PropagateRequestIdLayer::new(request_id::X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(
                request_id::X_REQUEST_ID,
                request_id::NanoIdRequestId,
            ))
    }

    /// Bind the configured address and serve until `cancel` fires.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", self.config.bind_addr))?;
        serve_on(listener, router, cancel).await
    }
}

/// Serve on an already bound listener; in-flight requests finish after `cancel`.
pub async fn serve_on(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("HTTP server listening on {}", addr);

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_follows_config() {
        let ingress = ApiIngress::new(ApiIngressConfig {
            allowed_origins: vec!["http://localhost:3000".into(), "".into()],
            ..Default::default()
        });
        assert_eq!(ingress.policy.len(), 1);
        assert_eq!(ingress.config().body_limit_bytes, 100 * 1024);
    }

    #[tokio::test]
    async fn serve_reports_bad_bind_address() {
        let ingress = ApiIngress::new(ApiIngressConfig {
            bind_addr: "not-an-address".into(),
            ..Default::default()
        });
        let err = ingress
            .serve(Router::new(), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not-an-address"));
    }
}
