//! Update function of the form loader component.
//!
//! Network round-trips are split in two messages: `Fetch`/`Submit` start the
//! request through the loader and spawn it, `Fetched`/`Submitted` feed the
//! outcome back so the loader can store it.

use admin_common::form::values::url_segment_for;
use admin_common::form::{SchemaTransport, SubmitError};
use admin_common::model::message::MessageType;
use gloo_console::{error, log};
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::set_window_dirty_flag;
use super::messages::Msg;
use super::state::FormBuilderLoader;
use crate::transport::{JsonTransport, MultipartTransport};

const TITLE_FIELD: &str = "Title";
const SEGMENT_FIELD: &str = "URLSegment";

pub fn update(
    component: &mut FormBuilderLoader,
    ctx: &Context<FormBuilderLoader>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Fetch(request) => {
            let Some(request) = component.loader.begin_fetch(request) else {
                return false;
            };
            let url = component.loader.props().schema_url.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = JsonTransport.fetch(&url, &request).await;
                link.send_message(Msg::Fetched(outcome));
            });
            true
        }
        Msg::Fetched(outcome) => {
            if let Err(response) = component.loader.complete_fetch(outcome) {
                error!(format!(
                    "Loading {} failed with {} error(s)",
                    component.loader.props().schema_url,
                    response.errors.len()
                ));
            }
            true
        }
        Msg::Change(field, value) => {
            let autofill_segment = field == TITLE_FIELD && segment_follows_title(component);
            if autofill_segment {
                let segment = url_segment_for(value.as_str().unwrap_or_default());
                component.loader.change(&field, value);
                component
                    .loader
                    .autofill(SEGMENT_FIELD, Value::String(segment));
            } else {
                component.loader.change(&field, value);
            }
            set_window_dirty_flag(!component.loader.is_pristine());
            true
        }
        Msg::FileSelected(field, file) => {
            match file {
                Some(file) => {
                    let name = file.name();
                    component.files.borrow_mut().insert(field.clone(), file);
                    component.loader.change(&field, Value::String(name));
                }
                None => {
                    component.files.borrow_mut().remove(&field);
                }
            }
            set_window_dirty_flag(!component.loader.is_pristine());
            true
        }
        Msg::Submit(action) => {
            if component.submitting {
                return false;
            }
            let values = component.loader.values();
            let submission = if component.files.borrow().is_empty() {
                component.loader.start_submit(&JsonTransport, values, &action)
            } else {
                let transport = MultipartTransport::new(component.files.clone());
                component.loader.start_submit(&transport, values, &action)
            };
            component.submitting = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let response = submission.await;
                link.send_message(Msg::Submitted(response));
            });
            true
        }
        Msg::Submitted(response) => {
            component.submitting = false;
            match component.loader.complete_submit(response) {
                Ok(_) => {
                    component.files.borrow_mut().clear();
                }
                Err(SubmitError::Validation(fields)) => {
                    log!(format!("Validation failed for {:?}", fields.keys()));
                    component.admin.on_message.emit((
                        "Please check the highlighted fields.".to_string(),
                        MessageType::Notice,
                    ));
                }
                Err(SubmitError::Transport(response)) => {
                    for entry in response.errors {
                        component
                            .admin
                            .on_message
                            .emit((entry.value, MessageType::Error));
                    }
                }
            }
            true
        }
    }
}

/// The URL segment keeps following the title while it is empty or was itself
/// filled from the title.
fn segment_follows_title(component: &FormBuilderLoader) -> bool {
    let forms = component.admin.forms.borrow();
    let Some(record) = forms.get(&component.loader.identifier()) else {
        return true;
    };
    record.autofilled.contains(SEGMENT_FIELD)
        || record
            .values
            .get(SEGMENT_FIELD)
            .and_then(Value::as_str)
            .is_none_or(str::is_empty)
}
