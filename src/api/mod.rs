/*
 * Responsibility
 * - HTTP surface under /api (routes() の re-export)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
