//! Renderers the admin client can swap, resolved by name through an
//! [`admin_common::registry::Registry`] passed down in the admin context.
//!
//! - `Loading`: placeholder shown while a schema loads.
//! - `ReduxForm`: the `<form>` wrapper around fields, messages and actions.
//! - `ReduxFormField`: the wrapper of one field (label, holder, message).
//! - one renderer per field `type` (`Text`, `TextArea`, `HTMLEditor`,
//!   `Hidden`, `ReadOnly`, `File`, `Checkbox`).

use admin_common::model::schema::{FieldError, FieldSpec};
use admin_common::registry::Registry;
use serde_json::Value;
use std::rc::Rc;
use yew::prelude::*;

use crate::components::fields;

/// Everything a field renderer needs to draw one field.
#[derive(Clone, PartialEq)]
pub struct FieldProps {
    pub spec: FieldSpec,
    pub value: Value,
    /// Validation message, already escaped HTML.
    pub message: Option<String>,
    pub on_change: Callback<Value>,
    pub on_file: Callback<(String, Option<web_sys::File>)>,
}

/// A rendered control and what its wrapper shows around it.
#[derive(Clone, PartialEq)]
pub struct HolderProps {
    pub spec: FieldSpec,
    pub message: Option<String>,
    pub control: Html,
}

/// Everything the form renderer needs to draw a loaded form.
#[derive(Clone, PartialEq)]
pub struct FormProps {
    pub name: String,
    pub fields: Html,
    /// Actions after pristine/dirty styling.
    pub actions: Vec<FieldSpec>,
    /// Form-level messages from the stored state.
    pub messages: Vec<FieldError>,
    pub submitting: bool,
    pub on_action: Callback<String>,
}

pub type Render<P> = Rc<dyn Fn(&P) -> Html>;

#[derive(Clone)]
pub enum Injectable {
    Loading(Html),
    Form(Render<FormProps>),
    Holder(Render<HolderProps>),
    Field(Render<FieldProps>),
}

pub type AdminRegistry = Registry<Injectable>;

pub fn default_registry() -> AdminRegistry {
    let mut registry = AdminRegistry::new();
    registry
        .register("Loading", || Injectable::Loading(fields::loading()))
        .register("ReduxForm", || Injectable::Form(Rc::new(fields::form)))
        .register("ReduxFormField", || {
            Injectable::Holder(Rc::new(fields::field_holder))
        })
        .register("Text", || Injectable::Field(Rc::new(fields::text)))
        .register("TextArea", || Injectable::Field(Rc::new(fields::text_area)))
        .register("HTMLEditor", || Injectable::Field(Rc::new(fields::html_editor)))
        .register("Hidden", || Injectable::Field(Rc::new(fields::hidden)))
        .register("ReadOnly", || Injectable::Field(Rc::new(fields::read_only)))
        .register("File", || Injectable::Field(Rc::new(fields::file)))
        .register("Checkbox", || Injectable::Field(Rc::new(fields::checkbox)));
    registry
}

pub fn loading(registry: &AdminRegistry) -> Html {
    match registry.get("Loading") {
        Some(Injectable::Loading(html)) => html,
        _ => html! { <div class="cms-content-loading-spinner" /> },
    }
}

pub fn form_renderer(registry: &AdminRegistry) -> Option<Render<FormProps>> {
    match registry.get("ReduxForm") {
        Some(Injectable::Form(render)) => Some(render),
        _ => None,
    }
}

pub fn holder_renderer(registry: &AdminRegistry) -> Option<Render<HolderProps>> {
    match registry.get("ReduxFormField") {
        Some(Injectable::Holder(render)) => Some(render),
        _ => None,
    }
}

/// The renderer registered for a field type, if any.
pub fn field_renderer(registry: &AdminRegistry, field_type: &str) -> Option<Render<FieldProps>> {
    match registry.get(field_type) {
        Some(Injectable::Field(render)) => Some(render),
        _ => None,
    }
}
