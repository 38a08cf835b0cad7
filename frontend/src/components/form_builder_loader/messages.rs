use admin_common::form::{FetchFailure, SchemaRequest};
use admin_common::model::schema::FormSchema;
use serde_json::Value;

pub enum Msg {
    Fetch(SchemaRequest),
    Fetched(Result<FormSchema, FetchFailure>),
    Change(String, Value),
    FileSelected(String, Option<web_sys::File>),
    Submit(String),
    Submitted(Result<Option<FormSchema>, FetchFailure>),
}
