use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

use crate::model::schema::FormValues;

/// Client-side editing state of one form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormRecord {
    /// Values as last initialized from the server.
    pub initial: FormValues,
    /// Values as currently edited.
    pub values: FormValues,
    /// Fields whose value was set by another field rather than by the user.
    pub autofilled: BTreeSet<String>,
    pub submit_succeeded: bool,
}

impl FormRecord {
    pub fn is_pristine(&self) -> bool {
        self.values == self.initial
    }
}

/// Editing state of every mounted form, keyed by form identifier.
#[derive(Debug, Default)]
pub struct FormValuesStore {
    forms: HashMap<String, FormRecord>,
}

impl FormValuesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets a form to fresh values from the server, making it pristine again.
    pub fn initialize(&mut self, identifier: &str, values: FormValues, keep_submit_succeeded: bool) {
        let record = self.forms.entry(identifier.to_string()).or_default();
        let submit_succeeded = keep_submit_succeeded && record.submit_succeeded;
        *record = FormRecord {
            initial: values.clone(),
            values,
            autofilled: BTreeSet::new(),
            submit_succeeded,
        };
    }

    /// Records a user edit.
    pub fn change(&mut self, identifier: &str, field: &str, value: Value) {
        let record = self.forms.entry(identifier.to_string()).or_default();
        record.values.insert(field.to_string(), value);
        record.autofilled.remove(field);
    }

    /// Sets a field from another field's behaviour and flags it as autofilled.
    pub fn autofill(&mut self, identifier: &str, field: &str, value: Value) {
        let record = self.forms.entry(identifier.to_string()).or_default();
        record.values.insert(field.to_string(), value);
        record.autofilled.insert(field.to_string());
    }

    pub fn set_submit_succeeded(&mut self, identifier: &str, succeeded: bool) {
        self.forms
            .entry(identifier.to_string())
            .or_default()
            .submit_succeeded = succeeded;
    }

    pub fn get(&self, identifier: &str) -> Option<&FormRecord> {
        self.forms.get(identifier)
    }

    pub fn values(&self, identifier: &str) -> Option<&FormValues> {
        self.forms.get(identifier).map(|record| &record.values)
    }

    /// A form nobody has initialized or edited counts as pristine.
    pub fn is_pristine(&self, identifier: &str) -> bool {
        self.forms
            .get(identifier)
            .is_none_or(FormRecord::is_pristine)
    }

    pub fn submit_succeeded(&self, identifier: &str) -> bool {
        self.forms
            .get(identifier)
            .is_some_and(|record| record.submit_succeeded)
    }

    /// Drops the state of an unmounted form.
    pub fn remove(&mut self, identifier: &str) -> Option<FormRecord> {
        self.forms.remove(identifier)
    }
}
