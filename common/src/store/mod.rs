//! Client-side stores: schemas per URL, editing state per form identifier and
//! the toast message list.

pub mod form_values;
pub mod messages;
pub mod schema_store;

pub use form_values::{FormRecord, FormValuesStore};
pub use messages::MessageList;
pub use schema_store::{SchemaEntry, SchemaStore};
