//! Transport-level layers applied to every route, public or not.
//!
//! - `x-request-id`: generated when missing, echoed on the response
//! - access log (TraceLayer), tagged with the request id
//! - request body limit and global timeout, both from `Config`
//!
//! The body limit is enforced by the body extractor, not up front, so an
//! oversized upload is only reported after authentication and the route
//! guard have run.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::{Request, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "request",
            method = %req.method(),
            uri = %req.uri(),
            request_id
        )
    });

    let layers = ServiceBuilder::new()
        // Timeout errors become responses so the service stays `Infallible`.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                AppError::RequestTimeout
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                AppError::Internal
            }
        }))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(trace)
        .layer(DefaultBodyLimit::max(config.request_body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )));

    router.layer(layers)
}
