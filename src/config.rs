/*
 * Responsibility
 * - Load settings from the environment (.env supported)
 * - Validate them up front: anything missing or unparsable fails startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::services::auth::access_jwt::is_supported_algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub request_body_limit_bytes: usize,
    pub request_timeout_seconds: u64,

    pub auth_issuer: String,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,
    pub access_jwt_algorithm: Algorithm,
    pub access_jwt_public_key_pem: String,

    // Log malformed `realm_access` shapes (result is unaffected)
    pub auth_claim_diagnostics: bool,
    pub seed_demo_course: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key -> value source (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match non_empty("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8081,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_body_limit_bytes = match non_empty("REQUEST_BODY_LIMIT_BYTES") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            None => 1024 * 1024,
        };

        let request_timeout_seconds = match non_empty("REQUEST_TIMEOUT_SECONDS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        let auth_issuer = non_empty("AUTH_ISSUER")
            .ok_or(ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience = non_empty("AUTH_AUDIENCE");

        let access_token_leeway_seconds = match non_empty("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 60,
        };

        let access_jwt_algorithm = match non_empty("ACCESS_JWT_ALGORITHM") {
            Some(v) => Algorithm::from_str(v.trim())
                .ok()
                .filter(|alg| is_supported_algorithm(*alg))
                .ok_or(ConfigError::Invalid("ACCESS_JWT_ALGORITHM"))?,
            None => Algorithm::RS256,
        };

        let access_jwt_public_key_pem = non_empty("ACCESS_JWT_PUBLIC_KEY_PEM")
            .ok_or(ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM"))?
            .replace("\\n", "\n");

        let auth_claim_diagnostics = parse_flag(&lookup, "AUTH_CLAIM_DIAGNOSTICS", false)?;
        let seed_demo_course = parse_flag(&lookup, "SEED_DEMO_COURSE", true)?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_body_limit_bytes,
            request_timeout_seconds,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            access_jwt_algorithm,
            access_jwt_public_key_pem,
            auth_claim_diagnostics,
            seed_demo_course,
        })
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key)),
    }
}
