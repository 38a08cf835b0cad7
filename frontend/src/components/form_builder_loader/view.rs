//! View of the form loader: a loading placeholder until the schema is in the
//! store, then the form drawn through the registry's renderers.

use admin_common::form::pristine::apply_action_transforms;
use admin_common::model::schema::{FieldSpec, FormState, FormValues};
use serde_json::Value;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::FormBuilderLoader;
use crate::components::fields;
use crate::registry::{
    field_renderer, form_renderer, holder_renderer, loading, AdminRegistry, FieldProps,
    FormProps, HolderProps,
};

pub fn view(component: &FormBuilderLoader, ctx: &Context<FormBuilderLoader>) -> Html {
    let registry = component.registry(ctx.props());

    // A failed load renders nothing; the error went to the message list.
    if component.loader.did_error() {
        return Html::default();
    }
    if !component.loader.is_ready() {
        return loading(&registry);
    }
    let Some(schema) = component.loader.schema() else {
        return loading(&registry);
    };
    let Some(structure) = schema.schema.as_ref() else {
        return loading(&registry);
    };

    let link = ctx.link();
    let state = schema.state.clone().unwrap_or_default();
    let values = component.loader.values();
    let fields_html: Html = structure
        .fields
        .iter()
        .map(|spec| render_field(spec, &state, &values, &registry, link))
        .collect();

    let props = FormProps {
        name: structure.name.clone(),
        fields: fields_html,
        actions: apply_action_transforms(&structure.actions, component.loader.is_pristine()),
        messages: state.messages.clone(),
        submitting: component.submitting,
        on_action: link.callback(Msg::Submit),
    };
    let form = match form_renderer(&registry) {
        Some(render) => render(&props),
        None => fields::form(&props),
    };

    html! {
        <div class="form-builder-loader" data-identifier={component.loader.identifier()}>
            { form }
        </div>
    }
}

/// Draws one field (and its children) with the renderer registered for its
/// type, wrapped by the `ReduxFormField` holder.
fn render_field(
    spec: &FieldSpec,
    state: &FormState,
    values: &FormValues,
    registry: &AdminRegistry,
    link: &Scope<FormBuilderLoader>,
) -> Html {
    let field_state = state.field(&spec.name);
    let value = values
        .get(&spec.name)
        .cloned()
        .or_else(|| field_state.map(|field| field.value.clone()))
        .unwrap_or(Value::Null);
    let message = field_state.and_then(|field| field.message.clone());

    let field_type = spec.field_type.as_deref().unwrap_or("Text");
    let name = spec.name.clone();
    let props = FieldProps {
        spec: spec.clone(),
        value,
        message: message.clone(),
        on_change: link.callback(move |value| Msg::Change(name.clone(), value)),
        on_file: link.callback(|(field, file): (String, Option<web_sys::File>)| {
            Msg::FileSelected(field, file)
        }),
    };
    let control = match field_renderer(registry, field_type) {
        Some(render) => render(&props),
        None => fields::text(&props),
    };
    let children: Html = spec
        .children
        .iter()
        .map(|child| render_field(child, state, values, registry, link))
        .collect();
    let control = html! { <>{ control }{ children }</> };

    match holder_renderer(registry) {
        Some(render) => render(&HolderProps {
            spec: spec.clone(),
            message,
            control,
        }),
        None => control,
    }
}
