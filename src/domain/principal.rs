//! The authenticated caller of one request.
//!
//! Built once from the validated claim set and never mutated afterwards. The
//! authority set is always derived from the very claim set the principal holds.

use serde_json::Value;
use thiserror::Error;

use crate::domain::authority::AuthoritySet;
use crate::domain::claims::ClaimSet;

pub const CLAIM_SUBJECT: &str = "sub";
pub const CLAIM_USERNAME: &str = "preferred_username";
pub const CLAIM_EMAIL: &str = "email";
pub const CLAIM_REALM_ACCESS: &str = "realm_access";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("claim set has no usable 'sub'")]
    MissingSubject,
}

#[derive(Debug, Clone)]
pub struct Principal {
    subject: String,
    username: Option<String>,
    email: Option<String>,
    authorities: AuthoritySet,
    raw_claims: ClaimSet,
}

impl Principal {
    /// `derive` is the authority mapping rule; it only ever sees `claims`.
    pub fn from_claims<F>(claims: ClaimSet, derive: F) -> Result<Self, PrincipalError>
    where
        F: FnOnce(&ClaimSet) -> AuthoritySet,
    {
        // Kept as sent so `/me` echoes exactly what `claims.sub` holds.
        let subject = claims
            .get_str(CLAIM_SUBJECT)
            .filter(|s| !s.trim().is_empty())
            .ok_or(PrincipalError::MissingSubject)?
            .to_string();

        let username = claims.get_str(CLAIM_USERNAME).map(str::to_string);
        let email = claims.get_str(CLAIM_EMAIL).map(str::to_string);
        let authorities = derive(&claims);

        Ok(Self {
            subject,
            username,
            email,
            authorities,
            raw_claims: claims,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn authorities(&self) -> &AuthoritySet {
        &self.authorities
    }

    pub fn describe(&self) -> SelfDescription {
        SelfDescription {
            subject: self.subject.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            realm_access: self.raw_claims.get(CLAIM_REALM_ACCESS).cloned(),
            claims: self.raw_claims.clone(),
        }
    }
}

/// Read-only projection returned by the "describe self" operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfDescription {
    pub subject: String,
    pub username: Option<String>,
    pub email: Option<String>,
    /// Raw claim, whatever its shape.
    pub realm_access: Option<Value>,
    pub claims: ClaimSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> ClaimSet {
        ClaimSet::try_from(value).unwrap()
    }

    fn no_roles(_: &ClaimSet) -> AuthoritySet {
        AuthoritySet::empty()
    }

    fn role_claim(c: &ClaimSet) -> AuthoritySet {
        c.get_str("role").into_iter().collect()
    }

    #[test]
    fn picks_identity_claims() {
        let raw = json!({
            "sub": "8f1c",
            "preferred_username": "alice",
            "email": "alice@example.com",
        });
        let p = Principal::from_claims(claims(raw), no_roles).unwrap();

        let d = p.describe();

        assert_eq!(p.subject(), "8f1c");
        assert_eq!(d.username.as_deref(), Some("alice"));
        assert_eq!(d.email.as_deref(), Some("alice@example.com"));
        assert_eq!(p.authorities(), &AuthoritySet::empty());
    }

    #[test]
    fn authorities_are_derived_from_the_held_claims() {
        let raw = json!({ "sub": "x", "role": "R" });
        let p = Principal::from_claims(claims(raw), role_claim).unwrap();

        assert!(p.authorities().contains("R"));
        assert_eq!(p.describe().claims.get_str("role"), Some("R"));
    }

    #[test]
    fn missing_or_blank_subject_is_rejected() {
        let missing = Principal::from_claims(claims(json!({})), no_roles);
        let blank = Principal::from_claims(claims(json!({ "sub": "  " })), no_roles);
        let numeric = Principal::from_claims(claims(json!({ "sub": 7 })), no_roles);

        assert_eq!(missing.unwrap_err(), PrincipalError::MissingSubject);
        assert!(blank.is_err());
        assert!(numeric.is_err());
    }

    #[test]
    fn subject_is_kept_exactly_as_sent() {
        let raw = json!({ "sub": " padded-1 " });
        let p = Principal::from_claims(claims(raw), no_roles).unwrap();

        let d = p.describe();

        assert_eq!(p.subject(), " padded-1 ");
        assert_eq!(Some(d.subject.as_str()), d.claims.get_str("sub"));
    }

    #[test]
    fn describe_exposes_raw_realm_access_and_claims() {
        let raw = json!({
            "sub": "x",
            "realm_access": { "roles": ["ROLE_STUDENT"] },
            "azp": "react-client",
        });
        let c = claims(raw.clone());
        let p = Principal::from_claims(c, no_roles).unwrap();

        let d = p.describe();

        assert_eq!(d.subject, "x");
        assert_eq!(d.username, None);
        assert_eq!(d.realm_access, Some(json!({ "roles": ["ROLE_STUDENT"] })));
        assert_eq!(serde_json::to_value(&d.claims).unwrap(), raw);
    }

    #[test]
    fn non_string_optional_claims_are_absent() {
        let raw = json!({ "sub": "x", "email": false, "preferred_username": ["a"] });
        let d = Principal::from_claims(claims(raw), no_roles)
            .unwrap()
            .describe();

        assert_eq!(d.email, None);
        assert_eq!(d.username, None);
    }
}
