//! The form schema protocol as seen from a client: requesting schemas,
//! folding server errors into state, and driving fetch and submit round-trips.

pub mod error;
pub mod identifier;
pub mod loader;
pub mod normalize;
pub mod overrides;
pub mod pristine;
pub mod reduce;
pub mod request;
pub mod transport;
pub mod values;

pub use error::{ErrorResponse, FetchFailure, SubmitError};
pub use identifier::create_form_identifier;
pub use loader::{FormLoader, LoaderHooks, LoaderProps, NoHooks, SubmitHook};
pub use request::{SchemaRequest, SCHEMA_REQUEST_HEADER};
pub use transport::{FetchFuture, SchemaTransport, SubmitFuture, SubmitTransport};
