use serde_json::{Map, Value};

use crate::model::schema::FormState;

/// Recursively merges `patch` into `target`.
///
/// Objects are merged key by key; any other value in `patch` replaces the one
/// in `target`.
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

/// Applies caller-supplied state overrides to a fetched state.
///
/// Used when a form needs the server's schema but only part of its state, such
/// as editing one item of a richer record inline. Each entry of
/// `overrides.fields` is deep-merged onto the fetched field with the same
/// name; fields without an override pass through untouched. Every other key of
/// `overrides` replaces the state's key of the same name.
pub fn override_state_data(
    state: FormState,
    overrides: Option<&Value>,
) -> Result<FormState, serde_json::Error> {
    let Some(Value::Object(overrides)) = overrides else {
        return Ok(state);
    };

    let field_overrides: Vec<&Map<String, Value>> = overrides
        .get("fields")
        .and_then(Value::as_array)
        .map(|fields| fields.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default();

    let mut fields = Vec::with_capacity(state.fields.len());
    for field in &state.fields {
        let matching = field_overrides
            .iter()
            .find(|o| o.get("name").and_then(Value::as_str) == Some(field.name.as_str()));
        match matching {
            Some(field_override) => {
                let mut merged = serde_json::to_value(field)?;
                deep_merge(&mut merged, &Value::Object((*field_override).clone()));
                fields.push(merged);
            }
            None => fields.push(serde_json::to_value(field)?),
        }
    }

    let mut merged = match serde_json::to_value(&state)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged.insert("fields".to_string(), Value::Array(fields));

    serde_json::from_value(Value::Object(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(value: Value) -> FormState {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn deep_merge_is_right_biased() {
        let mut target = json!({ "a": 1, "nested": { "x": 1, "y": [1, 2] } });
        deep_merge(&mut target, &json!({ "nested": { "y": [3], "z": true }, "b": 2 }));
        assert_eq!(
            target,
            json!({ "a": 1, "b": 2, "nested": { "x": 1, "y": [3], "z": true } })
        );
    }

    #[test]
    fn field_override_merges_data() {
        let fetched = state(json!({
            "fields": [
                { "name": "Title", "value": "Home", "data": { "a": 1 } },
                { "name": "Content", "value": "Body" }
            ]
        }));
        let overrides = json!({ "fields": [{ "name": "Title", "data": { "b": 2 } }] });

        let merged = override_state_data(fetched, Some(&overrides)).unwrap();

        let title = merged.field("Title").unwrap();
        assert_eq!(title.value, json!("Home"));
        assert_eq!(title.extra["data"], json!({ "a": 1, "b": 2 }));
        assert_eq!(merged.field("Content").unwrap().value, json!("Body"));
        assert_eq!(merged.fields.len(), 2);
    }

    #[test]
    fn override_can_replace_value_and_other_keys() {
        let fetched = state(json!({
            "name": "EditForm",
            "fields": [{ "name": "Title", "value": "Home" }]
        }));
        let overrides = json!({
            "name": "InlineForm",
            "fields": [{ "name": "Title", "value": "Inline title" }]
        });

        let merged = override_state_data(fetched, Some(&overrides)).unwrap();

        assert_eq!(merged.extra["name"], json!("InlineForm"));
        assert_eq!(merged.field("Title").unwrap().value, json!("Inline title"));
    }

    #[test]
    fn no_overrides_passes_state_through() {
        let fetched = state(json!({ "fields": [{ "name": "Title", "value": "Home" }] }));
        let merged = override_state_data(fetched.clone(), None).unwrap();
        assert_eq!(merged, fetched);
    }
}
