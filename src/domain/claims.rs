//! Validated token claims.
//!
//! The identity provider decides the shape of the payload, so values stay
//! untyped (`serde_json::Value`). Accessors return `None` on absence *and* on
//! shape mismatch, which lets callers degrade instead of failing the request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim name -> claim value, as produced by the token validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Walks nested mappings, e.g. `["realm_access", "roles"]`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.get(first)?, |value, name| value.as_object()?.get(*name))
    }

    pub fn get_mapping(&self, path: &[&str]) -> Option<&Map<String, Value>> {
        self.get_path(path).and_then(Value::as_object)
    }

    pub fn get_sequence(&self, path: &[&str]) -> Option<&Vec<Value>> {
        self.get_path(path).and_then(Value::as_array)
    }
}

impl TryFrom<Value> for ClaimSet {
    type Error = Value;

    /// Only a JSON object is a claim set; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}
