use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::model::schema::FieldError;

/// Why a schema fetch or form submission did not produce a usable response.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchFailure {
    /// The server answered with a non-2xx status. `json` is the parsed body, or
    /// an empty object when the body was not JSON.
    Status {
        status: u16,
        status_text: String,
        json: Value,
    },
    /// The request never completed (offline, CORS, aborted, ...).
    Network(String),
    /// A 2xx answer whose body is not a form schema.
    Decode(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status {
                status,
                status_text,
                ..
            } => write!(f, "HTTP {} {}", status, status_text),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Decode(msg) => write!(f, "Invalid schema response: {}", msg),
        }
    }
}

impl std::error::Error for FetchFailure {}

/// Uniform, displayable shape of every failure: a list of messages.
///
/// This is also the body the admin server sends with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self {
            status: None,
            errors,
        }
    }
}

/// Outcome of a submission that did not succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// The round-trip failed; the user can only be shown a generic message.
    Transport(ErrorResponse),
    /// The server accepted the request but rejected some field values. Keys
    /// are field names, values the messages now shown inline.
    Validation(BTreeMap<String, Vec<String>>),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(response) => {
                let messages: Vec<&str> = response
                    .errors
                    .iter()
                    .map(|error| error.value.as_str())
                    .collect();
                write!(f, "Submission failed: {}", messages.join("; "))
            }
            Self::Validation(fields) => {
                let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                write!(f, "Validation failed for: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for SubmitError {}
