//! `x-request-id` handling: generate when absent, echo back, expose to handlers.

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderName},
    middleware::Next,
    response::Response,
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    request_id::{MakeRequestId, RequestId},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{Level, Span};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request id as seen by handlers (`Extension<XRequestId>`).
#[derive(Clone, Debug)]
pub struct XRequestId(pub String);

/// 21-character nanoid per request.
#[derive(Clone, Copy, Default)]
pub struct NanoIdRequestId;

impl MakeRequestId for NanoIdRequestId {
    fn make_request_id<B>(&mut self, _req: &axum::http::Request<B>) -> Option<RequestId> {
        let value = nanoid::nanoid!().parse().ok()?;
        Some(RequestId::new(value))
    }
}

fn header_str<'a>(req: &'a Request, name: &HeaderName) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

pub async fn stash_request_id(mut req: Request, next: Next) -> Response {
    let id = header_str(&req, &X_REQUEST_ID).unwrap_or("n/a").to_owned();
    req.extensions_mut().insert(XRequestId(id));
    next.run(req).await
}

fn request_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        path = %req.uri().path(),
        origin = header_str(req, &header::ORIGIN).unwrap_or("-"),
        request_id = header_str(req, &X_REQUEST_ID).unwrap_or("n/a"),
    )
}

/// One `http_request` span per request; status and latency are logged on response.
pub fn trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<Body>) -> Span,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(request_span as fn(&Request<Body>) -> Span)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
