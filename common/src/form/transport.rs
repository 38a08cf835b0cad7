use futures_util::future::LocalBoxFuture;

use super::error::FetchFailure;
use super::request::SchemaRequest;
use crate::model::schema::FormSchema;
use crate::requests::SubmitRequest;

pub type FetchFuture = LocalBoxFuture<'static, Result<FormSchema, FetchFailure>>;

/// `Ok(None)` is a successful submission whose response carried no schema.
pub type SubmitFuture = LocalBoxFuture<'static, Result<Option<FormSchema>, FetchFailure>>;

/// Fetches form schemas.
///
/// Implementations send [`SchemaRequest::header_value`] in the
/// `X-FormSchema-Request` header, resolve 2xx answers with the parsed body and
/// fail every other status with [`FetchFailure::Status`] (body parsed when
/// possible, `{}` otherwise). Overlapping calls are not deduplicated.
pub trait SchemaTransport {
    fn fetch(&self, url: &str, request: &SchemaRequest) -> FetchFuture;
}

/// Sends a form submission and returns the server's schema response.
///
/// Swapping implementations lets a form post multipart data when it carries
/// files, while the response handling stays the same.
pub trait SubmitTransport {
    fn submit(&self, url: &str, request: SubmitRequest) -> SubmitFuture;
}
