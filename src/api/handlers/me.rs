use axum::{Json, extract::State};

use crate::{
    api::{dto::me::MeResponse, extractors::CurrentPrincipal},
    error::AppError,
    state::AppState,
};

pub async fn me(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<MeResponse>, AppError> {
    let description = state.dispatcher.describe_self(&principal)?;

    Ok(Json(description.into()))
}
