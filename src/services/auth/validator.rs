//! Token validation boundary.
//!
//! The gateway never inspects raw bearer tokens itself: a `TokenValidator`
//! turns them into a validated `ClaimSet` or refuses them. Whatever the reason,
//! a refusal ends up as `401 Unauthorized`.
use async_trait::async_trait;
use std::{error::Error as StdError, fmt};

use crate::domain::claims::ClaimSet;

#[derive(Debug)]
pub enum TokenError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "missing or empty '{}' claim", name),
        }
    }
}

impl StdError for TokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            Self::EmptyClaim(_) => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

#[async_trait]
pub trait TokenValidator: Send + Sync {
    // Validator name (for logging).
    fn name(&self) -> &'static str;

    // Validate a bearer token (without the `Bearer ` prefix).
    async fn validate(&self, token: &str) -> Result<ClaimSet, TokenError>;
}
