/*
 * Responsibility
 * - /courses handlers
 * - The dispatcher checks the route guard first; handlers only translate
 *   HTTP <-> dispatcher calls
 */
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
};

use crate::{
    api::{dto::courses::CourseResponse, extractors::CurrentPrincipal},
    domain::course::PayloadError,
    error::AppError,
    state::AppState,
};

pub async fn list_courses(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let courses = state.dispatcher.list_courses(&principal)?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

// The body read is not allowed to fail the request on its own: a caller who
// may not create courses gets 403 whatever they sent.
pub async fn create_course(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CourseResponse>, AppError> {
    let body = body.as_deref().map_err(payload_error);
    let course = state.dispatcher.create_course(&principal, body)?;

    Ok(Json(course.into()))
}

fn payload_error(rejection: &BytesRejection) -> PayloadError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PayloadError::TooLarge
    } else {
        PayloadError::Unreadable(rejection.body_text())
    }
}
