//! Runtime state of a `FormBuilderLoader` and the loader hooks it installs.

use admin_common::form::{ErrorResponse, FormLoader, LoaderHooks};
use admin_common::model::message::MessageType;
use admin_common::model::schema::FormSchema;
use std::rc::Rc;
use yew::Callback;

use super::helpers::set_window_dirty_flag;
use super::props::FormBuilderLoaderProps;
use crate::context::AdminContext;
use crate::registry::AdminRegistry;
use crate::transport::SelectedFiles;

pub struct FormBuilderLoader {
    /// Fetch/submit coordinator over the shared stores.
    pub loader: FormLoader,

    pub admin: AdminContext,

    /// Files picked in `File` fields since the last successful submit. When
    /// any are present the form is posted as multipart.
    pub files: SelectedFiles,

    /// A submission is in flight; action buttons are disabled.
    pub submitting: bool,

    /// Guard for the first-render fetch.
    pub loaded: bool,
}

impl FormBuilderLoader {
    pub fn new(props: &FormBuilderLoaderProps, admin: AdminContext) -> Self {
        Self {
            loader: build_loader(props, &admin),
            admin,
            files: SelectedFiles::default(),
            submitting: false,
            loaded: false,
        }
    }

    /// Points the component at new props, dropping per-form state.
    pub fn reset(&mut self, props: &FormBuilderLoaderProps) {
        self.loader = build_loader(props, &self.admin);
        self.files.borrow_mut().clear();
        self.submitting = false;
        self.loaded = false;
    }

    pub fn registry(&self, props: &FormBuilderLoaderProps) -> AdminRegistry {
        match &props.context {
            Some(context) => self.admin.registry.with_context(context),
            None => (*self.admin.registry).clone(),
        }
    }
}

fn build_loader(props: &FormBuilderLoaderProps, admin: &AdminContext) -> FormLoader {
    FormLoader::new(props.loader_props(), admin.schemas.clone(), admin.forms.clone())
        .with_hooks(Rc::new(MessageHooks {
            on_message: admin.on_message.clone(),
        }))
}

/// Reports loader events through the app's message list.
struct MessageHooks {
    on_message: Callback<(String, MessageType)>,
}

impl LoaderHooks for MessageHooks {
    fn on_loading_error(&self, error: &ErrorResponse) {
        for entry in &error.errors {
            self.on_message
                .emit((entry.value.clone(), MessageType::Error));
        }
    }

    fn on_submit_success(&self, schema: &FormSchema) {
        set_window_dirty_flag(false);
        let notices = schema
            .state
            .iter()
            .flat_map(|state| state.messages.iter())
            .filter(|message| message.error_type == "good");
        for notice in notices {
            self.on_message
                .emit((notice.value.clone(), MessageType::Success));
        }
    }

    fn on_redux_form_init(&self) {
        set_window_dirty_flag(false);
    }
}
