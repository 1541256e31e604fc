pub mod auth;
pub mod authority_mapper;
pub mod dispatcher;
pub mod route_guard;
