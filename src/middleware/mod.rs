/*
 * Responsibility
 * - middleware の公開インターフェース
 * - each module exposes `apply(router, ..)` so app.rs stays a flat list of layers
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
