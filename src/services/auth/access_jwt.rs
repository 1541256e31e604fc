use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::domain::claims::ClaimSet;
use crate::services::auth::validator::{TokenError, TokenValidator};

/// Signature families we can build a verification key for from a PEM.
/// Shared-secret (HS*) algorithms are deliberately absent: the gateway only
/// ever holds the identity provider's public key.
pub fn is_supported_algorithm(algorithm: Algorithm) -> bool {
    decoding_key_kind(algorithm).is_some()
}

#[derive(Debug, Clone, Copy)]
enum KeyKind {
    Rsa,
    Ec,
    Ed,
}

fn decoding_key_kind(algorithm: Algorithm) -> Option<KeyKind> {
    match algorithm {
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => Some(KeyKind::Rsa),
        Algorithm::ES256 | Algorithm::ES384 => Some(KeyKind::Ec),
        Algorithm::EdDSA => Some(KeyKind::Ed),
        _ => None,
    }
}

/// Access-token verifier against a single, statically configured public key.
///
/// - Key material is intentionally not printable via Debug.
/// - Key discovery / rotation is not handled here.
#[derive(Clone)]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtValidator {
    pub fn new(
        public_key_pem: &str,
        algorithm: Algorithm,
        issuer: &str,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Result<Self, TokenError> {
        let pem = public_key_pem.as_bytes();
        let decoding_key = match decoding_key_kind(algorithm) {
            Some(KeyKind::Rsa) => DecodingKey::from_rsa_pem(pem)?,
            Some(KeyKind::Ec) => DecodingKey::from_ec_pem(pem)?,
            Some(KeyKind::Ed) => DecodingKey::from_ed_pem(pem)?,
            None => {
                return Err(TokenError::Jwt(
                    jsonwebtoken::errors::ErrorKind::InvalidAlgorithm.into(),
                ));
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            // Keycloak access tokens often carry `aud: account` only; without a
            // configured audience we do not check it.
            None => validation.validate_aud = false,
        }
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    // Verify and decode a JWT access token.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<ClaimSet>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks signature, `exp`, `nbf`, `iss`
    /// and (when configured) `aud`. On top of that `sub` must be a non-empty
    /// string, since it becomes the principal's subject.
    pub fn verify_strict(&self, token: &str) -> Result<ClaimSet, TokenError> {
        let claims = self.verify(token)?;

        match claims.get_str("sub") {
            Some(sub) if !sub.trim().is_empty() => Ok(claims),
            _ => Err(TokenError::EmptyClaim("sub")),
        }
    }
}

#[async_trait]
impl TokenValidator for JwtValidator {
    fn name(&self) -> &'static str {
        "jwt"
    }

    async fn validate(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.verify_strict(token)
    }
}
