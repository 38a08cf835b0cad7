use serde_json::Value;
use std::collections::HashMap;
use std::rc::Rc;

use crate::model::schema::FormSchema;

/// What the client knows about one schema URL.
#[derive(Debug, Clone, Default)]
pub struct SchemaEntry {
    /// Last stored schema. Shared read-only; updates replace the `Rc`.
    pub schema: Option<Rc<FormSchema>>,
    /// Form identifier the schema was stored under.
    pub identifier: Option<String>,
    /// A fetch for this URL is in flight.
    pub loading: bool,
    /// Partial state applied over every fetched state for this URL.
    pub state_override: Option<Value>,
}

/// Last-known schemas, keyed by schema URL.
///
/// Written only by form loaders (on fetch and on submit); views read it.
#[derive(Debug, Default)]
pub struct SchemaStore {
    entries: HashMap<String, SchemaEntry>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored schema for `url` wholesale.
    pub fn set_schema(&mut self, url: &str, schema: Rc<FormSchema>, identifier: &str) {
        let entry = self.entries.entry(url.to_string()).or_default();
        entry.schema = Some(schema);
        entry.identifier = Some(identifier.to_string());
    }

    /// Marks a fetch for `url` as started or finished. Idempotent.
    pub fn set_schema_loading(&mut self, url: &str, loading: bool) {
        self.entries.entry(url.to_string()).or_default().loading = loading;
    }

    pub fn set_state_override(&mut self, url: &str, state_override: Option<Value>) {
        self.entries.entry(url.to_string()).or_default().state_override = state_override;
    }

    pub fn entry(&self, url: &str) -> Option<&SchemaEntry> {
        self.entries.get(url)
    }

    pub fn get(&self, url: &str) -> Option<Rc<FormSchema>> {
        self.entries.get(url).and_then(|entry| entry.schema.clone())
    }

    pub fn is_loading(&self, url: &str) -> bool {
        self.entries.get(url).is_some_and(|entry| entry.loading)
    }

    pub fn state_override(&self, url: &str) -> Option<&Value> {
        self.entries
            .get(url)
            .and_then(|entry| entry.state_override.as_ref())
    }
}
