//! Default renderers registered in [`crate::registry::default_registry`].

use admin_common::model::schema::{FieldError, FieldSpec};
use serde_json::Value;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::registry::{FieldProps, FormProps, HolderProps};

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn title_of(spec: &FieldSpec) -> String {
    spec.title.clone().unwrap_or_else(|| spec.name.clone())
}

fn input_callback(props: &FieldProps) -> Callback<InputEvent> {
    let on_change = props.on_change.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_change.emit(Value::String(input.value()));
    })
}

fn textarea_callback(props: &FieldProps) -> Callback<InputEvent> {
    let on_change = props.on_change.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        on_change.emit(Value::String(input.value()));
    })
}

pub fn loading() -> Html {
    html! {
        <div class="cms-content-loading-overlay">
            <div class="cms-content-loading-spinner" />
        </div>
    }
}

fn form_message(message: &FieldError) -> Html {
    let class = classes!("message", message.error_type.clone());
    html! {
        <p class={class} role="alert">{ message.value.clone() }</p>
    }
}

fn action_button(action: &FieldSpec, props: &FormProps) -> Html {
    let name = action.name.clone();
    let on_action = props.on_action.clone();
    let onclick = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        on_action.emit(name.clone());
    });
    html! {
        <button
            type="submit"
            name={action.name.clone()}
            class={action.extra_class.clone().unwrap_or_default()}
            disabled={props.submitting}
            {onclick}
        >
            if let Some(icon) = &action.icon {
                <span class={format!("font-icon-{}", icon)} />
            }
            { title_of(action) }
        </button>
    }
}

pub fn form(props: &FormProps) -> Html {
    let onsubmit = Callback::from(|e: SubmitEvent| e.prevent_default());
    html! {
        <form class="form form--edit" name={props.name.clone()} {onsubmit}>
            <div class="form__messages">
                { for props.messages.iter().map(form_message) }
            </div>
            <fieldset class="form__fields">
                { props.fields.clone() }
            </fieldset>
            <div class="btn-toolbar form__actions">
                { for props.actions.iter().map(|action| action_button(action, props)) }
            </div>
        </form>
    }
}

pub fn field_holder(props: &HolderProps) -> Html {
    if props.spec.field_type.as_deref() == Some("Hidden") {
        return props.control.clone();
    }
    let class = classes!(
        "form-group",
        "field",
        props.message.as_ref().map(|_| "has-error")
    );
    html! {
        <div class={class} id={format!("Form_{}_Holder", props.spec.name)}>
            <label class="form__field-label" for={props.spec.name.clone()}>
                { title_of(&props.spec) }
            </label>
            <div class="form__field-holder">
                { props.control.clone() }
                if let Some(message) = &props.message {
                    <div class="form__field-message">
                        { Html::from_html_unchecked(AttrValue::from(message.clone())) }
                    </div>
                }
            </div>
        </div>
    }
}

pub fn text(props: &FieldProps) -> Html {
    html! {
        <input
            type="text"
            class="text form-control"
            id={props.spec.name.clone()}
            name={props.spec.name.clone()}
            value={text_of(&props.value)}
            readonly={props.spec.read_only == Some(true)}
            oninput={input_callback(props)}
        />
    }
}

pub fn text_area(props: &FieldProps) -> Html {
    html! {
        <textarea
            class="textarea form-control"
            id={props.spec.name.clone()}
            name={props.spec.name.clone()}
            rows="5"
            value={text_of(&props.value)}
            oninput={textarea_callback(props)}
        />
    }
}

/// HTML content, edited as source.
pub fn html_editor(props: &FieldProps) -> Html {
    let source = text_of(&props.value);
    html! {
        <div class="htmleditor">
            <textarea
                class="htmleditor__source form-control"
                id={props.spec.name.clone()}
                name={props.spec.name.clone()}
                rows="12"
                value={source}
                oninput={textarea_callback(props)}
            />
        </div>
    }
}

pub fn hidden(props: &FieldProps) -> Html {
    html! {
        <input type="hidden" name={props.spec.name.clone()} value={text_of(&props.value)} />
    }
}

pub fn read_only(props: &FieldProps) -> Html {
    html! {
        <p class="form-control-static readonly" id={props.spec.name.clone()}>
            { text_of(&props.value) }
        </p>
    }
}

pub fn file(props: &FieldProps) -> Html {
    let name = props.spec.name.clone();
    let on_file = props.on_file.clone();
    let onchange = Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.get(0));
        on_file.emit((name.clone(), file));
    });
    let current = text_of(&props.value);
    html! {
        <div class="uploadfield">
            if !current.is_empty() {
                <span class="uploadfield__current">{ current }</span>
            }
            <input
                type="file"
                class="file"
                id={props.spec.name.clone()}
                name={props.spec.name.clone()}
                {onchange}
            />
        </div>
    }
}

pub fn checkbox(props: &FieldProps) -> Html {
    let on_change = props.on_change.clone();
    let onchange = Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_change.emit(Value::Bool(input.checked()));
    });
    let checked = match &props.value {
        Value::Bool(checked) => *checked,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => s == "1" || s == "true",
        _ => false,
    };
    html! {
        <input
            type="checkbox"
            class="checkbox"
            id={props.spec.name.clone()}
            name={props.spec.name.clone()}
            {checked}
            {onchange}
        />
    }
}
