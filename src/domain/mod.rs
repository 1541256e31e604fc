/*
 * Responsibility
 * - Framework-independent types shared by services, repos and handlers
 * - No axum / tokio here
 */
pub mod authority;
pub mod claims;
pub mod course;
pub mod principal;
