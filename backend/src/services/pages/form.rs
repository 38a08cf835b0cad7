//! The page edit form: its structure, its state and its validation rules.

use crate::db::PageRecord;
use admin_common::form::pristine::{ACTION_PUBLISH, ACTION_SAVE};
use admin_common::form::values::url_segment_for;
use admin_common::form::SchemaRequest;
use admin_common::model::schema::{
    FieldData, FieldError, FieldSpec, FieldState, FormSchema, FormState, FormValues, SchemaId,
    SchemaStructure,
};
use serde_json::{json, Value};

pub const FORM_NAME: &str = "EditForm";

fn field(name: &str, title: &str, field_type: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        title: Some(title.to_string()),
        field_type: Some(field_type.to_string()),
        ..Default::default()
    }
}

pub fn page_structure(page: &PageRecord) -> SchemaStructure {
    let mut status = field("Status", "Status", "ReadOnly");
    status.read_only = Some(true);

    let save = FieldSpec {
        extra_class: Some("btn".to_string()),
        icon: Some("save".to_string()),
        data: FieldData {
            pristine_class: Some("btn-outline-primary".to_string()),
            dirty_class: Some("btn-primary".to_string()),
            pristine_title: Some("Saved".to_string()),
            dirty_title: Some("Save".to_string()),
            pristine_icon: Some("tick".to_string()),
            dirty_icon: Some("save".to_string()),
            ..Default::default()
        },
        ..field(ACTION_SAVE, "Save", "FormAction")
    };
    let publish = FieldSpec {
        extra_class: Some("btn".to_string()),
        icon: Some("rocket".to_string()),
        data: FieldData {
            pristine_class: Some("btn-outline-primary".to_string()),
            dirty_class: Some("btn-primary".to_string()),
            pristine_title: Some("Published".to_string()),
            dirty_title: Some("Save & publish".to_string()),
            pristine_icon: Some("tick".to_string()),
            dirty_icon: Some("rocket".to_string()),
            is_published: Some(page.is_published),
            is_modified: Some(page.is_modified),
            ..Default::default()
        },
        ..field(ACTION_PUBLISH, "Publish", "FormAction")
    };

    SchemaStructure {
        name: FORM_NAME.to_string(),
        action: Some(format!("{}/{}", super::FORM_URL, page.id)),
        fields: vec![
            field("ID", "ID", "Hidden"),
            field("Title", "Page name", "Text"),
            field("URLSegment", "URL segment", "Text"),
            field("Content", "Content", "HTMLEditor"),
            field("Attachment", "Attachment", "File"),
            status,
        ],
        actions: vec![save, publish],
        ..Default::default()
    }
}

fn status_label(page: &PageRecord) -> &'static str {
    match (page.is_published, page.is_modified) {
        (false, _) => "Draft",
        (true, true) => "Modified",
        (true, false) => "Published",
    }
}

pub fn page_state(page: &PageRecord) -> FormState {
    let value = |name: &str, value: Value| FieldState {
        name: name.to_string(),
        value,
        ..Default::default()
    };
    FormState {
        fields: vec![
            value("ID", json!(page.id)),
            value("Title", json!(page.title)),
            value("URLSegment", json!(page.url_segment)),
            value("Content", json!(page.content)),
            value("Attachment", json!(page.attachment)),
            value("Status", json!(status_label(page))),
        ],
        ..Default::default()
    }
}

/// The state of `page` with submitted values laid over it, for echoing an
/// invalid submission back.
pub fn submitted_state(page: &PageRecord, values: &FormValues) -> FormState {
    let mut state = page_state(page);
    for field in &mut state.fields {
        if let Some(value) = values.get(&field.name) {
            field.value = value.clone();
        }
    }
    state
}

/// Builds the schema response for `page` with the requested facets. A request
/// naming no facet gets the structure and the state.
pub fn page_schema(page: &PageRecord, request: SchemaRequest) -> FormSchema {
    let request = if request.is_auto_only() {
        SchemaRequest {
            schema: true,
            state: true,
            errors: false,
        }
    } else {
        request
    };
    FormSchema {
        id: Some(SchemaId::Number(page.id)),
        schema: request.schema.then(|| page_structure(page)),
        state: request.state.then(|| page_state(page)),
        errors: None,
    }
}

fn text_value<'a>(values: &'a FormValues, name: &str) -> &'a str {
    values.get(name).and_then(Value::as_str).unwrap_or("")
}

pub fn validate(values: &FormValues) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if text_value(values, "Title").trim().is_empty() {
        errors.push(FieldError::for_field("Title", "Page name is required"));
    }
    if text_value(values, "Content")
        .to_ascii_lowercase()
        .contains("<script")
    {
        errors.push(FieldError::for_field(
            "Content",
            "Content must not contain <script> tags",
        ));
    }
    errors
}

/// Copies valid submitted values onto `page` and applies the action's
/// publishing rules.
pub fn apply_submission(page: &PageRecord, values: &FormValues, action: &str) -> PageRecord {
    let title = text_value(values, "Title").trim().to_string();
    let url_segment = match text_value(values, "URLSegment").trim() {
        "" => url_segment_for(&title),
        segment => url_segment_for(segment),
    };
    let attachment = match text_value(values, "Attachment") {
        "" => page.attachment.clone(),
        name => Some(name.to_string()),
    };
    let (is_published, is_modified) = if action == ACTION_PUBLISH {
        (true, false)
    } else {
        (page.is_published, page.is_published)
    };

    PageRecord {
        id: page.id,
        title,
        url_segment,
        content: text_value(values, "Content").to_string(),
        attachment,
        is_published,
        is_modified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_common::form::values::schema_field_values;

    fn page() -> PageRecord {
        PageRecord {
            id: 7,
            title: "About".to_string(),
            url_segment: "about".to_string(),
            content: "<p>Hi</p>".to_string(),
            attachment: None,
            is_published: true,
            is_modified: false,
        }
    }

    fn values(value: Value) -> FormValues {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn auto_request_gets_schema_and_state() {
        let schema = page_schema(&page(), SchemaRequest::parse_header("auto"));
        assert_eq!(schema.id, Some(SchemaId::Number(7)));
        assert_eq!(schema.name(), Some(FORM_NAME));
        assert!(schema.state.is_some());
        assert!(schema.errors.is_none());
    }

    #[test]
    fn state_only_request_omits_structure() {
        let schema = page_schema(&page(), SchemaRequest::parse_header("auto,state"));
        assert!(schema.schema.is_none());
        assert_eq!(
            schema.state.unwrap().field("Title").unwrap().value,
            json!("About")
        );
    }

    #[test]
    fn editable_values_skip_read_only_status() {
        let page = page();
        let values = schema_field_values(&page_structure(&page), &page_state(&page));
        assert_eq!(values["Title"], json!("About"));
        assert!(!values.contains_key("Status"));
    }

    #[test]
    fn publish_action_carries_record_flags() {
        let structure = page_structure(&page());
        let publish = structure
            .actions
            .iter()
            .find(|action| action.name == ACTION_PUBLISH)
            .unwrap();
        assert_eq!(publish.data.is_published, Some(true));
        assert_eq!(publish.data.is_modified, Some(false));
        assert_eq!(structure.action.as_deref(), Some("/admin/pages/EditForm/7"));
    }

    #[test]
    fn validation_rules() {
        assert!(validate(&values(json!({ "Title": "Ok", "Content": "<p>fine</p>" }))).is_empty());

        let errors = validate(&values(json!({ "Title": "  ", "Content": "<SCRIPT>x</SCRIPT>" })));
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_deref()).collect();
        assert_eq!(fields, vec![Some("Title"), Some("Content")]);
    }

    #[test]
    fn saving_published_page_marks_it_modified() {
        let saved = apply_submission(
            &page(),
            &values(json!({ "Title": "About Us", "URLSegment": "", "Content": "x" })),
            ACTION_SAVE,
        );
        assert_eq!(saved.url_segment, "about-us");
        assert!(saved.is_published);
        assert!(saved.is_modified);

        let published = apply_submission(&saved, &values(json!({ "Title": "About Us" })), ACTION_PUBLISH);
        assert!(published.is_published);
        assert!(!published.is_modified);
    }

    #[test]
    fn empty_attachment_keeps_existing_file() {
        let mut page = page();
        page.attachment = Some("old.pdf".to_string());
        let saved = apply_submission(&page, &values(json!({ "Title": "About" })), ACTION_SAVE);
        assert_eq!(saved.attachment.as_deref(), Some("old.pdf"));
    }

    #[test]
    fn submitted_values_overlay_state() {
        let state = submitted_state(&page(), &values(json!({ "Title": "" })));
        assert_eq!(state.field("Title").unwrap().value, json!(""));
        assert_eq!(state.field("Content").unwrap().value, json!("<p>Hi</p>"));
    }
}
