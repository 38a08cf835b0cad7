//! Folding server errors back into form state.
//!
//! A submit response may carry an `errors` list next to (or instead of) a new
//! `state`. The reducer turns it into per-field messages and form-level
//! messages on a fresh state value, so the store never holds an `errors` list
//! and never accumulates stale messages from an earlier round-trip.

use std::collections::BTreeMap;

use crate::model::schema::{FieldError, FormSchema, FormState};

/// Merges the `errors` of `next` into its state.
///
/// - Without errors, `next` is returned as is.
/// - When `next` carries no state, the state of `previous` is the base; when
///   it carries one, that state wins.
/// - Each field of the base state gets the first error naming it, rendered by
///   [`create_error_html`], or no message at all.
/// - Errors without a field become the state's form-level `messages`.
/// - Errors naming a field that is not in the state are dropped.
pub fn reduce_schema_errors(previous: Option<&FormSchema>, next: FormSchema) -> FormSchema {
    let mut reduced = next;
    let Some(errors) = reduced.errors.take() else {
        return reduced;
    };

    let mut state: FormState = reduced
        .state
        .take()
        .or_else(|| previous.and_then(|schema| schema.state.clone()))
        .unwrap_or_default();

    for field in &mut state.fields {
        field.message = errors
            .iter()
            .find(|error| !error.is_form_level() && error.field.as_deref() == Some(field.name.as_str()))
            .map(|error| create_error_html(&[error.value.as_str()]));
    }
    state.messages = errors
        .into_iter()
        .filter(FieldError::is_form_level)
        .collect();

    log::debug!(
        "merged {} form-level message(s) into schema state",
        state.messages.len()
    );
    reduced.state = Some(state);
    reduced
}

/// Renders validation messages as escaped HTML, one
/// `form__validation-message` span per message.
pub fn create_error_html(messages: &[&str]) -> String {
    messages
        .iter()
        .map(|message| {
            format!(
                "<span class=\"form__validation-message\">{}</span>",
                escape_html(message)
            )
        })
        .collect()
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Collects the message of every field that has one, keyed by field name.
pub fn get_messages(state: &FormState) -> BTreeMap<String, String> {
    state
        .fields
        .iter()
        .filter_map(|field| {
            field
                .message
                .as_ref()
                .map(|message| (field.name.clone(), message.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::FieldState;
    use proptest::prelude::*;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> FormSchema {
        serde_json::from_value(value).unwrap()
    }

    fn rendered(message: &str) -> String {
        format!("<span class=\"form__validation-message\">{message}</span>")
    }

    fn previous() -> FormSchema {
        schema(json!({
            "id": 1,
            "schema": { "name": "F", "fields": [{ "name": "Title" }, { "name": "Content" }] },
            "state": {
                "fields": [
                    { "name": "Title", "value": "Home", "message": "Old problem" },
                    { "name": "Content", "value": "" }
                ]
            }
        }))
    }

    #[test]
    fn response_without_errors_is_returned_unchanged() {
        let response = schema(json!({ "id": 1, "state": { "fields": [{ "name": "Title", "value": "x" }] } }));
        let reduced = reduce_schema_errors(Some(&previous()), response.clone());
        assert_eq!(reduced, response);
    }

    #[test]
    fn field_error_reuses_previous_state() {
        let response = schema(json!({
            "errors": [{ "field": "Content", "value": "Required", "type": "error" }]
        }));

        let reduced = reduce_schema_errors(Some(&previous()), response);

        let state = reduced.state.as_ref().unwrap();
        assert_eq!(state.field("Content").unwrap().message, Some(rendered("Required")));
        assert_eq!(state.field("Title").unwrap().value, json!("Home"));
        assert!(state.messages.is_empty());
        assert!(reduced.errors.is_none());
    }

    #[test]
    fn stale_messages_are_cleared() {
        let response = schema(json!({ "errors": [{ "value": "Session expired" }] }));

        let reduced = reduce_schema_errors(Some(&previous()), response);

        let state = reduced.state.unwrap();
        assert!(state.field("Title").unwrap().message.is_none());
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].value, "Session expired");
    }

    #[test]
    fn explicit_state_wins_over_previous_state() {
        let response = schema(json!({
            "state": { "fields": [{ "name": "Content", "value": "new" }] },
            "errors": [{ "field": "Content", "value": "Too short" }]
        }));

        let reduced = reduce_schema_errors(Some(&previous()), response);

        let state = reduced.state.unwrap();
        assert_eq!(state.fields.len(), 1);
        assert_eq!(state.field("Content").unwrap().value, json!("new"));
        assert_eq!(state.field("Content").unwrap().message, Some(rendered("Too short")));
    }

    #[test]
    fn unknown_field_errors_are_ignored() {
        let response = schema(json!({ "errors": [{ "field": "Missing", "value": "Nope" }] }));

        let reduced = reduce_schema_errors(Some(&previous()), response);

        let state = reduced.state.unwrap();
        assert_eq!(state.fields.len(), 2);
        assert!(state.fields.iter().all(|field| field.message.is_none()));
        assert!(state.messages.is_empty());
    }

    #[test]
    fn messages_are_escaped() {
        let response = schema(json!({ "errors": [{ "field": "Title", "value": "<b>bad</b> & worse" }] }));

        let reduced = reduce_schema_errors(Some(&previous()), response);

        assert_eq!(
            reduced.state.unwrap().field("Title").unwrap().message,
            Some(rendered("&lt;b&gt;bad&lt;/b&gt; &amp; worse"))
        );
    }

    #[test]
    fn each_message_gets_its_own_span() {
        assert_eq!(
            create_error_html(&["Too short", "Must be \"unique\""]),
            format!("{}{}", rendered("Too short"), rendered("Must be &quot;unique&quot;"))
        );
        assert_eq!(create_error_html(&[]), "");
    }

    #[test]
    fn no_state_anywhere_keeps_form_level_messages() {
        let response = schema(json!({ "errors": [{ "value": "Error", "code": 500 }] }));
        let reduced = reduce_schema_errors(None, response);
        let state = reduced.state.unwrap();
        assert!(state.fields.is_empty());
        assert_eq!(state.messages[0].code, Some(500));
    }

    #[test]
    fn get_messages_collects_field_messages() {
        let state = FormState {
            fields: vec![
                FieldState {
                    name: "Title".to_string(),
                    message: Some("Required".to_string()),
                    ..Default::default()
                },
                FieldState {
                    name: "Content".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let messages = get_messages(&state);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages["Title"], "Required");
    }

    fn field_names() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::btree_set("[A-Z][a-z]{1,6}", 0..8)
            .prop_map(|names| names.into_iter().collect())
    }

    proptest! {
        #[test]
        fn errors_are_conserved(
            names in field_names(),
            stale in proptest::collection::vec(any::<bool>(), 8),
            targets in proptest::collection::vec((any::<Option<prop::sample::Index>>(), any::<bool>()), 0..10),
        ) {
            let fields: Vec<FieldState> = names
                .iter()
                .enumerate()
                .map(|(i, name)| FieldState {
                    name: name.clone(),
                    message: stale[i].then(|| "stale".to_string()),
                    ..Default::default()
                })
                .collect();
            let prev = FormSchema {
                state: Some(FormState { fields, ..Default::default() }),
                ..Default::default()
            };

            // Each error either targets a known field (at most once), an unknown
            // field, or the form as a whole.
            let mut used = std::collections::BTreeSet::new();
            let mut errors = Vec::new();
            let mut unmatched = 0;
            for (n, (target, known)) in targets.iter().enumerate() {
                match target {
                    Some(index) if *known && !names.is_empty() => {
                        let name = index.get(&names).clone();
                        if used.insert(name.clone()) {
                            errors.push(FieldError::for_field(&name, format!("e{n}")));
                        }
                    }
                    Some(_) => {
                        unmatched += 1;
                        errors.push(FieldError::for_field(&format!("unknown{n}"), "x"));
                    }
                    None => errors.push(FieldError::form_level(format!("f{n}"), "error")),
                }
            }
            let total = errors.len();
            let response = FormSchema { errors: Some(errors), ..Default::default() };

            let reduced = reduce_schema_errors(Some(&prev), response);
            let state = reduced.state.unwrap();

            let field_matched = state.fields.iter().filter(|f| f.message.is_some()).count();
            prop_assert_eq!(field_matched, used.len());
            prop_assert_eq!(total, field_matched + state.messages.len() + unmatched);
            for field in &state.fields {
                prop_assert_eq!(field.message.is_some(), used.contains(&field.name));
            }
            prop_assert!(reduced.errors.is_none());
        }
    }
}
