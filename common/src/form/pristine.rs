use crate::model::schema::FieldSpec;

/// Name of the action that saves a draft.
pub const ACTION_SAVE: &str = "action_save";
/// Name of the action that saves and publishes.
pub const ACTION_PUBLISH: &str = "action_publish";

/// Restyles a form action for a pristine or dirty form.
///
/// Classes from `extraClass` are kept; `data.pristineClass` is switched on for a
/// pristine form and `data.dirtyClass` for a dirty one. The title and icon are
/// replaced by their pristine/dirty variants when those are set.
pub fn toggle_pristine_state(field: &FieldSpec, is_pristine: bool) -> FieldSpec {
    let mut classes: Vec<(String, bool)> = Vec::new();
    let mut set_class = |name: &str, enabled: bool| {
        match classes.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = enabled,
            None => classes.push((name.to_string(), enabled)),
        }
    };

    if let Some(extra) = &field.extra_class {
        for class in extra.split(' ').filter(|class| !class.is_empty()) {
            set_class(class, true);
        }
    }
    if let Some(class) = &field.data.pristine_class {
        set_class(class, is_pristine);
    }
    if let Some(class) = &field.data.dirty_class {
        set_class(class, !is_pristine);
    }

    let (custom_title, custom_icon) = if is_pristine {
        (&field.data.pristine_title, &field.data.pristine_icon)
    } else {
        (&field.data.dirty_title, &field.data.dirty_icon)
    };

    let extra_class = classes
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(" ");

    FieldSpec {
        title: custom_title.clone().or_else(|| field.title.clone()),
        icon: custom_icon.clone().or_else(|| field.icon.clone()),
        extra_class: Some(extra_class),
        ..field.clone()
    }
}

/// Applies the pristine/dirty styling to the save and publish actions.
///
/// Save follows the form; publish only counts as pristine when the record is
/// published, unmodified and the form itself is pristine.
pub fn apply_action_transforms(actions: &[FieldSpec], form_pristine: bool) -> Vec<FieldSpec> {
    actions
        .iter()
        .map(|action| match action.name.as_str() {
            ACTION_SAVE => toggle_pristine_state(action, form_pristine),
            ACTION_PUBLISH => {
                let is_pristine = action.data.is_published == Some(true)
                    && action.data.is_modified != Some(true)
                    && form_pristine;
                toggle_pristine_state(action, is_pristine)
            }
            _ => action.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn save_action() -> FieldSpec {
        serde_json::from_value(json!({
            "name": "action_save",
            "title": "Save",
            "icon": "save",
            "extraClass": "btn btn-primary",
            "data": {
                "pristineClass": "btn-outline-primary",
                "dirtyClass": "btn-primary",
                "pristineTitle": "Saved",
                "pristineIcon": "tick"
            }
        }))
        .unwrap()
    }

    #[test]
    fn pristine_uses_pristine_variants() {
        let field = toggle_pristine_state(&save_action(), true);
        assert_eq!(field.extra_class.as_deref(), Some("btn btn-outline-primary"));
        assert_eq!(field.title.as_deref(), Some("Saved"));
        assert_eq!(field.icon.as_deref(), Some("tick"));
    }

    #[test]
    fn dirty_falls_back_to_defaults() {
        let field = toggle_pristine_state(&save_action(), false);
        assert_eq!(field.extra_class.as_deref(), Some("btn btn-primary"));
        assert_eq!(field.title.as_deref(), Some("Save"));
        assert_eq!(field.icon.as_deref(), Some("save"));
    }

    #[test]
    fn publish_is_dirty_when_record_modified() {
        let publish: FieldSpec = serde_json::from_value(json!({
            "name": "action_publish",
            "title": "Publish",
            "data": { "isPublished": true, "isModified": true, "pristineTitle": "Published" }
        }))
        .unwrap();
        let other: FieldSpec = serde_json::from_value(json!({ "name": "action_archive" })).unwrap();

        let actions = apply_action_transforms(&[publish, other.clone()], true);

        assert_eq!(actions[0].title.as_deref(), Some("Publish"));
        assert_eq!(actions[1], other);
    }
}
