//! Claims -> authorities.
//!
//! Reads `realm_access.roles` and wraps every role verbatim. Roles are expected
//! to arrive already in their final form (e.g. `ROLE_ADMIN`); nothing is
//! prefixed or rewritten here.
//!
//! Any unexpected shape yields the empty set. No authorities means no
//! privileged route matches, so a malformed token can only lose access.

use serde_json::Value;

use crate::domain::authority::{Authority, AuthoritySet};
use crate::domain::claims::ClaimSet;
use crate::domain::principal::CLAIM_REALM_ACCESS;

pub const CLAIM_ROLES: &str = "roles";

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorityMapper {
    diagnostics: bool,
}

impl AuthorityMapper {
    /// With `diagnostics` on, malformed shapes are reported via `tracing`.
    /// The returned set is the same either way.
    pub fn new(diagnostics: bool) -> Self {
        Self { diagnostics }
    }

    pub fn map(&self, claims: &ClaimSet) -> AuthoritySet {
        let Some(roles) = claims.get_sequence(&[CLAIM_REALM_ACCESS, CLAIM_ROLES]) else {
            if self.diagnostics {
                report_missing_roles(claims);
            }
            return AuthoritySet::empty();
        };

        roles
            .iter()
            .map(|role| {
                if self.diagnostics && !role.is_string() {
                    report("realm_access.roles[]", "non-string role coerced", role);
                }
                Authority::new(role_name(role))
            })
            .collect()
    }
}

// Only reached with diagnostics on; works out which level of the path broke.
fn report_missing_roles(claims: &ClaimSet) {
    let Some(realm_access) = claims.get(CLAIM_REALM_ACCESS) else {
        return;
    };
    match claims.get_mapping(&[CLAIM_REALM_ACCESS]) {
        None => report("realm_access", "not an object", realm_access),
        Some(mapping) => match mapping.get(CLAIM_ROLES) {
            None => report("realm_access.roles", "missing", &Value::Null),
            Some(roles) => report("realm_access.roles", "not an array", roles),
        },
    }
}

fn report(path: &'static str, problem: &'static str, value: &Value) {
    tracing::warn!(
        claim = path,
        problem,
        kind = value_kind(value),
        "malformed role claim"
    );
}

/// Strings verbatim (including `""`); anything else as its compact JSON text.
fn role_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> AuthoritySet {
        let claims = ClaimSet::try_from(value).unwrap();
        AuthorityMapper::default().map(&claims)
    }

    fn set(names: &[&str]) -> AuthoritySet {
        names.iter().copied().collect()
    }

    #[test]
    fn no_realm_access_means_no_authorities() {
        let none = AuthoritySet::empty();

        assert_eq!(map(json!({})), none);
        assert_eq!(map(json!({ "roles": ["ROLE_ADMIN"] })), none);
    }

    #[test]
    fn realm_access_of_wrong_shape_means_no_authorities() {
        let none = AuthoritySet::empty();

        assert_eq!(map(json!({ "realm_access": "ROLE_ADMIN" })), none);
        assert_eq!(map(json!({ "realm_access": ["ROLE_ADMIN"] })), none);
        assert_eq!(map(json!({ "realm_access": null })), none);
    }

    #[test]
    fn roles_missing_or_of_wrong_shape_means_no_authorities() {
        let none = AuthoritySet::empty();
        let as_string = json!({ "roles": "ROLE_ADMIN" });
        let as_object = json!({ "roles": { "0": "ROLE_ADMIN" } });

        assert_eq!(map(json!({ "realm_access": {} })), none);
        assert_eq!(map(json!({ "realm_access": as_string })), none);
        assert_eq!(map(json!({ "realm_access": as_object })), none);
    }

    #[test]
    fn roles_are_wrapped_verbatim() {
        let got = map(json!({
            "realm_access": { "roles": ["ROLE_ADMIN", "offline_access"] }
        }));

        assert_eq!(got, set(&["ROLE_ADMIN", "offline_access"]));
        assert!(!got.contains("ROLE_offline_access"));
    }

    #[test]
    fn result_is_a_set_regardless_of_order_or_duplicates() {
        let a = map(json!({ "realm_access": { "roles": ["a", "a", "b"] } }));
        let b = map(json!({ "realm_access": { "roles": ["b", "a"] } }));

        assert_eq!(a, set(&["a", "b"]));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_string_is_a_role_like_any_other() {
        let got = map(json!({ "realm_access": { "roles": ["", "ROLE_ADMIN"] } }));

        assert_eq!(got, set(&["", "ROLE_ADMIN"]));
        assert!(got.contains(""));
    }

    #[test]
    fn non_string_entries_are_coerced_to_their_json_text() {
        let got = map(json!({
            "realm_access": { "roles": ["ROLE_STUDENT", 7, true, null, {}, ["x"]] }
        }));
        let want = set(&["ROLE_STUDENT", "7", "true", "null", "{}", r#"["x"]"#]);

        assert_eq!(got, want);
        assert!(!got.contains("ROLE_ADMIN"));
    }

    #[test]
    fn client_roles_elsewhere_are_ignored() {
        let got = map(json!({
            "realm_access": { "roles": ["ROLE_STUDENT"] },
            "resource_access": { "account": { "roles": ["ROLE_ADMIN"] } },
        }));

        assert_eq!(got, set(&["ROLE_STUDENT"]));
    }

    #[test]
    fn diagnostics_do_not_change_the_result() {
        let loud = AuthorityMapper::new(true);
        let quiet = AuthorityMapper::new(false);

        for raw in [
            json!({ "realm_access": { "roles": "x" } }),
            json!({ "realm_access": 3 }),
            json!({ "realm_access": {} }),
            json!({ "realm_access": { "roles": ["a", 1] } }),
        ] {
            let claims = ClaimSet::try_from(raw).unwrap();

            assert_eq!(loud.map(&claims), quiet.map(&claims));
        }
    }
}
