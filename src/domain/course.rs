/*
 * Responsibility
 * - Course entity (placeholder data owned by the course store)
 * - NewCourse: create payload after defaulting
 *
 * Notes
 * - Missing or wrong-typed fields fall back to defaults; only a body that is not
 *   JSON at all, or that could not be read in full, is rejected.
 */
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_DESCRIPTION: &str = "";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("request body exceeds the size limit")]
    TooLarge,
    #[error("request body could not be read: {0}")]
    Unreadable(String),
}

impl NewCourse {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Anything other than a JSON object carries no usable fields.
    pub fn from_payload(payload: &Value) -> Self {
        let field = |name: &str, default: &str| {
            payload
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };

        Self {
            title: field("title", DEFAULT_TITLE),
            description: field("description", DEFAULT_DESCRIPTION),
        }
    }

    /// Parse a raw request body. An empty body is the same as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, PayloadError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let payload: Value = serde_json::from_slice(body)?;
        Ok(Self::from_payload(&payload))
    }

    pub fn into_course(self, id: i64) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
        }
    }
}

impl Default for NewCourse {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_DESCRIPTION)
    }
}
