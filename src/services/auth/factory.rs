//! Factory: build the token validator from application `Config`.
use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::services::auth::{JwtValidator, TokenValidator};

pub fn build_token_validator(config: &Config) -> Result<Arc<dyn TokenValidator>, ConfigError> {
    let validator = JwtValidator::new(
        &config.access_jwt_public_key_pem,
        config.access_jwt_algorithm,
        &config.auth_issuer,
        config.auth_audience.as_deref(),
        config.access_token_leeway_seconds,
    )
    .map_err(|err| {
        tracing::error!(
            error = %err,
            algorithm = ?config.access_jwt_algorithm,
            "failed to load access token public key"
        );
        ConfigError::Invalid("ACCESS_JWT_PUBLIC_KEY_PEM")
    })?;

    Ok(Arc::new(validator))
}
