//! JSON response helpers shared by every admin endpoint.
//!
//! Error bodies use the same `{ errors: [...] }` shape as form schema
//! responses, so the client can show them with the same code.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use admin_common::form::ErrorResponse;
use admin_common::model::schema::FieldError;
use serde::Serialize;

/// Fallback message for an error status when the caller supplies none.
pub fn default_error_message(status: u16) -> &'static str {
    match status {
        400 => "Sorry, it seems there was something wrong with the request.",
        401 => "Sorry, it seems you are not authorised to access this section or object.",
        403 => "Sorry, it seems the action you were trying to perform is forbidden.",
        404 => "Sorry, it seems you were trying to access a section or object that doesn't exist.",
        500 => "Sorry, it seems there was an internal server error.",
        503 => "Sorry, it seems the service is temporarily unavailable.",
        _ => "Error",
    }
}

/// Builds a JSON error response with a single form-level error.
///
/// Statuses that are not valid HTTP codes are answered with 500.
pub fn json_error(status: u16, message: Option<&str>) -> HttpResponse {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let value = message.unwrap_or_else(|| default_error_message(code.as_u16()));
    let body = ErrorResponse {
        status: Some("error".to_string()),
        errors: vec![FieldError {
            field: None,
            code: Some(code.as_u16()),
            value: value.to_string(),
            error_type: "error".to_string(),
        }],
    };
    HttpResponse::build(code).json(body)
}

/// Builds a JSON success response.
///
/// Only 2xx statuses are accepted. `None` produces an empty body.
pub fn json_success<T: Serialize>(status: u16, data: Option<&T>) -> Result<HttpResponse, String> {
    let code = StatusCode::from_u16(status).map_err(|e| e.to_string())?;
    if !code.is_success() {
        return Err(format!("json_success called with non-2xx status {}", status));
    }
    let body = match data {
        Some(data) => serde_json::to_vec(data).map_err(|e| e.to_string())?,
        None => Vec::new(),
    };
    Ok(HttpResponse::build(code)
        .content_type("application/json")
        .body(body))
}

/// [`json_success`] with status 200, answering 500 when the body cannot be
/// produced.
pub fn json_ok<T: Serialize>(data: &T) -> HttpResponse {
    json_success(200, Some(data)).unwrap_or_else(|e| {
        log::error!("Failed to build JSON response: {}", e);
        json_error(500, None)
    })
}
