pub mod access_jwt;
pub mod factory;
pub mod validator;

pub use access_jwt::JwtValidator;
pub use factory::build_token_validator;
pub use validator::TokenValidator;
