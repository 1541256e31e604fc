//! Bearer token -> validated claims -> Principal in request extensions.
//!
//! Everything that fails here is an authentication failure (401). Whether the
//! principal may perform the operation is decided later, by the dispatcher.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::domain::principal::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Require a valid bearer token on every route of `router`.
///
/// ```ignore
/// let api = middleware::auth::access::apply(api::routes(), state.clone());
/// app = app.nest("/api", api);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

/// `Authorization: Bearer <token>`; the scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AppError::Unauthorized)?;

    let claims = match state.auth.validate(token).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                error = %err,
                validator = state.auth.name(),
                "access token verification failed"
            );
            return Err(AppError::Unauthorized);
        }
    };

    let principal = Principal::from_claims(claims, |c| state.mapper.map(c)).map_err(|err| {
        tracing::warn!(error = %err, "validated token has no usable subject");
        AppError::Unauthorized
    })?;

    tracing::debug!(
        subject = principal.subject(),
        authorities = %principal.authorities(),
        "authenticated"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn extracts_bearer_token() {
        let jwt = headers("Bearer abc.def.ghi");

        assert_eq!(bearer_token(&jwt), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
