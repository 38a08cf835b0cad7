//! # Pages Section
//!
//! Form schema endpoints for editing pages. The client loads a page's edit
//! form from the schema endpoint and posts it back as JSON, or as multipart
//! form data when a file is attached.
//!
//! ## Routes
//!
//! *   **`GET /admin/pages/schema/EditForm/{id}`** (`schema::process`): the
//!     form schema of page `id`. The `X-FormSchema-Request` header selects the
//!     facets (`schema`, `state`, `errors`); without one the response carries
//!     the structure and the state.
//! *   **`POST /admin/pages/EditForm/{id}`** (`submit::process`): JSON
//!     `{ values, action }`.
//! *   **`POST /admin/pages/EditForm/{id}/multipart`** (`upload::process`):
//!     the same submission as multipart fields, with an optional `Attachment`
//!     file part.
//!
//! Both submission routes answer `200` with `{ id, errors }` when validation
//! fails and `{ id, schema, state }` once the page is saved. Unknown pages
//! answer `404`, unknown actions `400`.

mod form;
mod schema;
mod submit;
mod upload;

use actix_web::web::{get, post, scope};
use actix_web::{HttpRequest, Scope};
use admin_common::form::{SchemaRequest, SCHEMA_REQUEST_HEADER};

pub const SECTION_URL: &str = "/admin/pages";
pub const SCHEMA_URL: &str = "/admin/pages/schema/EditForm";
pub const FORM_URL: &str = "/admin/pages/EditForm";

pub fn configure_routes() -> Scope {
    scope(SECTION_URL)
        .route("/schema/EditForm/{id}", get().to(schema::process))
        .route("/EditForm/{id}", post().to(submit::process))
        .route("/EditForm/{id}/multipart", post().to(upload::process))
}

/// Facets named in the request's `X-FormSchema-Request` header. A missing or
/// unreadable header names none.
fn requested_facets(req: &HttpRequest) -> SchemaRequest {
    let header = req
        .headers()
        .get(SCHEMA_REQUEST_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    SchemaRequest::parse_header(header)
}
