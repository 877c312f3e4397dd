//! Request and response types for the spam detection service
//!
//! The service owns these shapes; everything here is deserialized leniently so
//! that an extra or missing optional field never takes the run down.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::{Error, Result};

/// A fixed test input with the category it is expected to fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePost {
    pub text: &'static str,
    pub category: &'static str,
}

/// Body of `POST /validate-post`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatePostRequest {
    pub text: String,
    pub username: String,
    pub timestamp: String,
}

impl ValidatePostRequest {
    /// Timestamp layout the service expects; millis are always zero
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S.000Z";

    pub fn for_sample(post: &SamplePost, index: usize, now: DateTime<Utc>) -> Self {
        Self {
            text: post.text.to_string(),
            username: format!("testuser{}", index),
            timestamp: now.format(Self::TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Response payload as received
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

/// Outcome of a single HTTP call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult {
    /// HTTP status, 0 when the service could not be reached
    pub status: u16,
    pub data: Option<ResponseBody>,
    pub error: Option<String>,
}

impl RequestResult {
    pub const PARSE_FAILURE: &'static str = "Failed to parse JSON response";

    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            status: 0,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Classify a raw response body: empty means no data, anything that is not
    /// JSON is kept as text and flagged as a parse failure
    pub fn from_body(status: u16, body: &str) -> Self {
        if body.is_empty() {
            return Self {
                status,
                data: None,
                error: None,
            };
        }

        match serde_json::from_str::<Value>(body) {
            Ok(json) => Self {
                status,
                data: Some(ResponseBody::Json(json)),
                error: None,
            },
            Err(_) => Self {
                status,
                data: Some(ResponseBody::Text(body.to_string())),
                error: Some(Self::PARSE_FAILURE.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.data {
            Some(ResponseBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Deserialize the JSON body into a typed response
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.json().ok_or_else(|| Error::Parse {
            message: "response has no JSON body".to_string(),
        })?;
        Ok(T::deserialize(value)?)
    }
}

/// `GET /ai-status` payload
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AiStatus {
    #[serde(default)]
    pub ai_enabled: bool,
    #[serde(default)]
    pub ai_configured: bool,
    #[serde(default)]
    pub connection_status: bool,
    #[serde(default)]
    pub model_info: Option<ModelInfo>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub model: String,
}

/// Moderation decision returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Action {
    Allow,
    Flag,
    Reject,
    Unknown(String),
}

impl From<String> for Action {
    fn from(value: String) -> Self {
        match value.as_str() {
            "allow" => Action::Allow,
            "flag" => Action::Flag,
            "reject" => Action::Reject,
            _ => Action::Unknown(value),
        }
    }
}

impl Action {
    pub fn emoji(&self) -> &'static str {
        match self {
            Action::Allow => "✅",
            Action::Flag => "⚠️",
            Action::Reject => "❌",
            Action::Unknown(_) => "❓",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Allow => write!(f, "ALLOW"),
            Action::Flag => write!(f, "FLAG"),
            Action::Reject => write!(f, "REJECT"),
            Action::Unknown(raw) => write!(f, "{}", raw.to_uppercase()),
        }
    }
}

/// `POST /validate-post` payload on success
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ValidationResponse {
    pub detection: Detection,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub action: Action,
    pub is_spam: bool,
    /// Fraction in `0.0..=1.0`
    pub confidence: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub ai_analysis: Option<AiAnalysis>,
}

impl Detection {
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub is_spam: bool,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Error payload of a non-200 response
///
/// Each field is read on its own, so one oddly typed field does not hide the
/// others. Non-string `message`/`reason` values are kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    pub error: Option<Value>,
    pub message: Option<String>,
    pub reason: Option<String>,
}

fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl ErrorBody {
    /// Pull an error body out of a result, empty when there is none
    pub fn from_result(result: &RequestResult) -> Self {
        match result.json() {
            Some(body) => Self {
                error: body.get("error").cloned(),
                message: body.get("message").and_then(text_field),
                reason: body.get("reason").and_then(text_field),
            },
            None => Self::default(),
        }
    }

    /// True when `error` carries something other than null, false, zero or an
    /// empty string, array or object
    pub fn has_error(&self) -> bool {
        match &self.error {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::Number(n)) => n.as_f64().map_or(true, |n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(fields)) => !fields.is_empty(),
            Some(Value::Bool(true)) => true,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref().filter(|r| !r.is_empty())
    }
}
