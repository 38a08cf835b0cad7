use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field values keyed by field name, as edited in the client and posted on submit.
pub type FormValues = Map<String, Value>;

/// Identifier the server assigns to a schema response.
///
/// Servers answer with either a numeric record id or the schema URL itself, so
/// both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaId {
    Number(i64),
    Text(String),
}

/// A form schema response: structure, current state and any errors.
///
/// Every part is optional on the wire. A response that omits `state` means
/// "state unchanged", and `errors` only ever appears on responses; stored
/// schemas have had their errors folded into `state` (see
/// [`crate::form::reduce::reduce_schema_errors`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SchemaId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaStructure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<FormState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl FormSchema {
    /// The schema's own name, if the structure part has been received.
    pub fn name(&self) -> Option<&str> {
        self.schema
            .as_ref()
            .map(|structure| structure.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// The structural part of a schema: which fields exist and how they look.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaStructure {
    #[serde(default)]
    pub name: String,
    /// URL the form posts to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<FieldSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Static description of one field (or form action).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default)]
    pub data: FieldData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Free-form `data` attached to a field spec. The pristine/dirty keys drive
/// the save and publish button states; anything else is kept untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pristine_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dirty_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pristine_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dirty_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pristine_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dirty_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_modified: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Values and messages of a form at one point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default)]
    pub fields: Vec<FieldState>,
    /// Form-level messages (errors or notices not tied to a field).
    #[serde(default)]
    pub messages: Vec<FieldError>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormState {
    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Current value of one field plus its validation message, if any.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldState {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An error or notice reported by the server.
///
/// Without a `field` the entry is a form-level message. `code` carries an HTTP
/// status when the entry was synthesized from a transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default = "default_error_type")]
    pub error_type: String,
}

fn default_error_type() -> String {
    "error".to_string()
}

impl FieldError {
    /// An error attached to a single field.
    pub fn for_field(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            code: None,
            value: value.into(),
            error_type: default_error_type(),
        }
    }

    /// A message for the whole form, of the given type (`error`, `good`, ...).
    pub fn form_level(value: impl Into<String>, error_type: &str) -> Self {
        Self {
            field: None,
            code: None,
            value: value.into(),
            error_type: error_type.to_string(),
        }
    }

    /// True when the entry is not attributable to a single field.
    pub fn is_form_level(&self) -> bool {
        self.field.as_deref().is_none_or(str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_partial_response() {
        let schema: FormSchema = serde_json::from_value(json!({
            "id": 1,
            "schema": { "name": "F", "fields": [{ "name": "Content" }] },
            "state": { "fields": [{ "name": "Content", "value": "hi" }] }
        }))
        .unwrap();

        assert_eq!(schema.id, Some(SchemaId::Number(1)));
        assert_eq!(schema.name(), Some("F"));
        let state = schema.state.unwrap();
        assert_eq!(state.field("Content").unwrap().value, json!("hi"));
        assert!(state.messages.is_empty());
        assert!(schema.errors.is_none());
    }

    #[test]
    fn keeps_unknown_field_attributes() {
        let field: FieldSpec = serde_json::from_value(json!({
            "name": "action_save",
            "extraClass": "btn",
            "attributes": { "type": "submit" },
            "data": { "pristineTitle": "Saved", "buttonTone": "primary" }
        }))
        .unwrap();

        assert_eq!(field.extra_class.as_deref(), Some("btn"));
        assert_eq!(field.data.pristine_title.as_deref(), Some("Saved"));
        assert_eq!(field.data.extra["buttonTone"], json!("primary"));

        let back = serde_json::to_value(&field).unwrap();
        assert_eq!(back["attributes"], json!({ "type": "submit" }));
    }

    #[test]
    fn error_without_field_is_form_level() {
        let errors: Vec<FieldError> = serde_json::from_value(json!([
            { "field": "Title", "value": "Required" },
            { "value": "Session expired", "type": "warning" },
            { "field": "", "value": "Blank field name" }
        ]))
        .unwrap();

        assert!(!errors[0].is_form_level());
        assert_eq!(errors[0].error_type, "error");
        assert!(errors[1].is_form_level());
        assert!(errors[2].is_form_level());
    }
}
