use crate::model::schema::{FieldSpec, FormState, FormValues, SchemaStructure};

/// Finds a field by name, searching nested `children` depth-first.
pub fn find_field<'a>(fields: &'a [FieldSpec], name: &str) -> Option<&'a FieldSpec> {
    fields.iter().find(|field| field.name == name).or_else(|| {
        fields
            .iter()
            .find_map(|field| find_field(&field.children, name))
    })
}

/// Derives the editable values of a form from its structure and state.
///
/// Only state fields that exist in the structure are kept; structural and
/// read-only fields carry no data and are skipped.
pub fn schema_field_values(structure: &SchemaStructure, state: &FormState) -> FormValues {
    let mut values = FormValues::new();
    for field_state in &state.fields {
        let Some(spec) = find_field(&structure.fields, &field_state.name) else {
            continue;
        };
        if spec.field_type.as_deref() == Some("Structural") || spec.read_only == Some(true) {
            continue;
        }
        values.insert(spec.name.clone(), field_state.value.clone());
    }
    values
}

/// Lowercase, dash-separated URL segment derived from a title. Used both to
/// autofill the segment while a title is typed and to fill a blank one on save.
pub fn url_segment_for(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
