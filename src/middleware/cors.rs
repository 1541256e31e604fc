//! CORS for the browser front end (the SPA that obtains tokens from the
//! identity provider and calls `/api/*`).
//!
//! - Development: any origin.
//! - Production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`; an empty
//!   list allows no cross-origin calls at all.
//!
//! Credentials (cookies) are never allowed: the API is bearer-only.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let cors = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });
        CorsLayer::new().allow_origin(allow_origin)
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    cors.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(std::time::Duration::from_secs(60 * 10))
}
