//! HTTP transports for the form loader, built on `gloo-net`.
//!
//! Requests go out with same-origin credentials and `Accept: application/json`.
//! A 2xx answer is decoded as a form schema (an empty body counts as "no
//! schema" for submissions); any other status becomes
//! [`FetchFailure::Status`] carrying whatever JSON the body held.

use admin_common::form::{
    FetchFailure, FetchFuture, SchemaRequest, SchemaTransport, SubmitFuture, SubmitTransport,
    SCHEMA_REQUEST_HEADER,
};
use admin_common::model::schema::FormSchema;
use admin_common::requests::SubmitRequest;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::{File, FormData, RequestCredentials};

/// Reads a response body, failing non-2xx statuses.
async fn read_body(response: Response) -> Result<String, FetchFailure> {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if (200..300).contains(&status) {
        return Ok(text);
    }
    Err(FetchFailure::Status {
        status,
        status_text: response.status_text(),
        json: serde_json::from_str::<Value>(&text).unwrap_or_else(|_| Value::Object(Default::default())),
    })
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, FetchFailure> {
    serde_json::from_str(text).map_err(|e| FetchFailure::Decode(e.to_string()))
}

fn decode_optional_schema(text: &str) -> Result<Option<FormSchema>, FetchFailure> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    decode(text).map(Some)
}

fn network(err: gloo_net::Error) -> FetchFailure {
    FetchFailure::Network(err.to_string())
}

/// Fetches schemas and posts submissions as JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JsonTransport;

impl SchemaTransport for JsonTransport {
    fn fetch(&self, url: &str, request: &SchemaRequest) -> FetchFuture {
        let url = url.to_string();
        let header = request.header_value();
        Box::pin(async move {
            let response = Request::get(&url)
                .header(SCHEMA_REQUEST_HEADER, &header)
                .header("Accept", "application/json")
                .credentials(RequestCredentials::SameOrigin)
                .send()
                .await
                .map_err(network)?;
            let text = read_body(response).await?;
            decode(&text)
        })
    }
}

impl SubmitTransport for JsonTransport {
    fn submit(&self, url: &str, request: SubmitRequest) -> SubmitFuture {
        let url = url.to_string();
        Box::pin(async move {
            let response = Request::post(&url)
                .header("Accept", "application/json")
                .credentials(RequestCredentials::SameOrigin)
                .json(&request)
                .map_err(network)?
                .send()
                .await
                .map_err(network)?;
            let text = read_body(response).await?;
            decode_optional_schema(&text)
        })
    }
}

/// Files picked in the form's file inputs, by field name.
pub type SelectedFiles = Rc<RefCell<HashMap<String, File>>>;

/// Posts submissions as `multipart/form-data` to `<action>/multipart`, so
/// file inputs travel with the values.
#[derive(Clone, Default)]
pub struct MultipartTransport {
    pub files: SelectedFiles,
}

impl MultipartTransport {
    pub fn new(files: SelectedFiles) -> Self {
        Self { files }
    }

    fn form_data(&self, request: &SubmitRequest) -> Result<FormData, FetchFailure> {
        let failure = |_| FetchFailure::Network("Could not build form data".to_string());
        let data = FormData::new().map_err(failure)?;
        for (name, value) in &request.values {
            if self.files.borrow().contains_key(name) {
                continue;
            }
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            data.append_with_str(name, &text).map_err(failure)?;
        }
        for (name, file) in self.files.borrow().iter() {
            data.append_with_blob_and_filename(name, file, &file.name())
                .map_err(failure)?;
        }
        data.append_with_str("action", &request.action)
            .map_err(failure)?;
        Ok(data)
    }
}

impl SubmitTransport for MultipartTransport {
    fn submit(&self, url: &str, request: SubmitRequest) -> SubmitFuture {
        let url = format!("{}/multipart", url.trim_end_matches('/'));
        let data = self.form_data(&request);
        Box::pin(async move {
            let response = Request::post(&url)
                .header("Accept", "application/json")
                .credentials(RequestCredentials::SameOrigin)
                .body(data?)
                .map_err(network)?
                .send()
                .await
                .map_err(network)?;
            let text = read_body(response).await?;
            decode_optional_schema(&text)
        })
    }
}
