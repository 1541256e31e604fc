use serde::Serialize;
use serde_json::Value;

use crate::domain::claims::ClaimSet;
use crate::domain::principal::SelfDescription;

/// `GET /api/me`. Absent claims serialize as `null`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub sub: String,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
    pub realm_access: Option<Value>,
    pub claims: ClaimSet,
}

impl From<SelfDescription> for MeResponse {
    fn from(d: SelfDescription) -> Self {
        Self {
            sub: d.subject,
            preferred_username: d.username,
            email: d.email,
            realm_access: d.realm_access,
            claims: d.claims,
        }
    }
}
