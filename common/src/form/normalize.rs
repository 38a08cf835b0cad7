use serde_json::Value;

use super::error::{ErrorResponse, FetchFailure};
use crate::model::schema::FieldError;

/// Fallback text when a failure carries nothing better to show.
pub const UNKNOWN_ERROR: &str = "An unknown error has occurred.";

/// Converts any fetch or submit failure into a list of displayable messages.
///
/// First match wins:
/// 1. a structured `errors` list in the response body is passed through;
/// 2. a status with status text becomes `{ code, value: status_text }`;
/// 3. anything else becomes `{ value: message }`, using [`UNKNOWN_ERROR`] when
///    there is no message.
pub fn normalise_error(failure: &FetchFailure) -> ErrorResponse {
    if let FetchFailure::Status { json, .. } = failure {
        if let Some(response) = structured_errors(json) {
            return response;
        }
    }

    let error = match failure {
        FetchFailure::Status {
            status,
            status_text,
            ..
        } if !status_text.is_empty() => FieldError {
            field: None,
            code: Some(*status),
            value: status_text.clone(),
            error_type: "error".to_string(),
        },
        FetchFailure::Network(message) | FetchFailure::Decode(message) if !message.is_empty() => {
            FieldError::form_level(message.clone(), "error")
        }
        _ => FieldError::form_level(UNKNOWN_ERROR, "error"),
    };
    ErrorResponse::new(vec![error])
}

fn structured_errors(json: &Value) -> Option<ErrorResponse> {
    json.get("errors")?.as_array()?;
    match serde_json::from_value::<ErrorResponse>(json.clone()) {
        Ok(response) => Some(response),
        Err(e) => {
            log::warn!("ignoring malformed error body: {}", e);
            None
        }
    }
}
