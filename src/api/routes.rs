/*
 * Responsibility
 * - URL structure under /api
 * - Every route here needs a principal; app.rs wraps the whole Router with the
 *   access middleware, and each handler's authority check lives in the dispatcher
 */
use axum::{Router, routing::get};

use crate::api::handlers::{
    courses::{create_course, list_courses},
    me::me,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/me", get(me))
}
