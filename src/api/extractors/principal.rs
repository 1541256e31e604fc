use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::principal::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Handler で Principal を受け取るための extractor.
///
/// The access middleware inserts the principal into the request extensions.
/// If it is missing the route was mounted without that middleware, and the
/// request is treated as unauthenticated.
pub struct CurrentPrincipal(pub Principal);

impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or(AppError::Unauthorized)
    }
}
