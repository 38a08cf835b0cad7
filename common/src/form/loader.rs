//! Fetch and submit coordination for one schema-driven form.
//!
//! A [`FormLoader`] is created per mounted form. It owns no data itself: the
//! schema lives in the shared [`SchemaStore`] (keyed by schema URL) and the
//! edited values in the shared [`FormValuesStore`] (keyed by form identifier).
//!
//! Each round-trip is split into a synchronous `begin_*`/`start_*` half, an
//! asynchronous transport call and a synchronous `complete_*` half, so
//! event-loop UIs can run the transport in a spawned task and feed the result
//! back as a message. [`FormLoader::fetch`] and [`FormLoader::submit`] chain
//! the three for callers that can hold the loader across an `.await`.
//!
//! Overlapping fetches for one URL are refused while the store marks it as
//! loading. Nothing is cancelled: a late response is still written, and the
//! last one to complete wins.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use super::error::{ErrorResponse, FetchFailure, SubmitError};
use super::identifier::create_form_identifier;
use super::normalize::normalise_error;
use super::overrides::override_state_data;
use super::reduce::{get_messages, reduce_schema_errors};
use super::request::SchemaRequest;
use super::transport::{SchemaTransport, SubmitFuture, SubmitTransport};
use super::values::schema_field_values;
use crate::model::schema::{FormSchema, FormValues};
use crate::requests::SubmitRequest;
use crate::store::{FormValuesStore, SchemaStore};

/// Side-effect hooks fired by a loader (routing, toasts, focus, ...).
///
/// Every method defaults to doing nothing.
pub trait LoaderHooks {
    fn on_fetching_schema(&self) {}
    fn on_loading_error(&self, _error: &ErrorResponse) {}
    fn on_loading_success(&self) {}
    fn on_submit_success(&self, _schema: &FormSchema) {}
    fn on_redux_form_init(&self) {}
}

/// Hooks that ignore every event.
pub struct NoHooks;

impl LoaderHooks for NoHooks {}

/// Wraps the default submission future. Receives the submitted values, the
/// action name and the future that performs the default submit; must return
/// the future to await instead. Returning `None` is a programming error.
pub type SubmitHook = Rc<dyn Fn(FormValues, String, SubmitFuture) -> Option<SubmitFuture>>;

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderProps {
    /// Caller-chosen prefix of the form identifier.
    pub identifier: String,
    pub schema_url: String,
    /// Fetch again on mount even when a schema is already stored.
    pub refetch_schema_on_mount: bool,
}

pub struct FormLoader {
    props: LoaderProps,
    schemas: Rc<RefCell<SchemaStore>>,
    forms: Rc<RefCell<FormValuesStore>>,
    hooks: Rc<dyn LoaderHooks>,
    on_submit: Option<SubmitHook>,
    did_error: bool,
}

impl FormLoader {
    pub fn new(
        props: LoaderProps,
        schemas: Rc<RefCell<SchemaStore>>,
        forms: Rc<RefCell<FormValuesStore>>,
    ) -> Self {
        Self {
            props,
            schemas,
            forms,
            hooks: Rc::new(NoHooks),
            on_submit: None,
            did_error: false,
        }
    }

    pub fn with_hooks(mut self, hooks: Rc<dyn LoaderHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_submit_hook(mut self, hook: SubmitHook) -> Self {
        self.on_submit = Some(hook);
        self
    }

    pub fn props(&self) -> &LoaderProps {
        &self.props
    }

    /// The schema currently stored for this loader's URL.
    pub fn schema(&self) -> Option<Rc<FormSchema>> {
        self.schemas.borrow().get(&self.props.schema_url)
    }

    pub fn identifier(&self) -> String {
        create_form_identifier(&self.props.identifier, self.schema().as_deref())
    }

    pub fn is_loading(&self) -> bool {
        self.schemas.borrow().is_loading(&self.props.schema_url)
    }

    /// Set once a fetch failed; the form is not rendered afterwards.
    pub fn did_error(&self) -> bool {
        self.did_error
    }

    /// True when there is a schema structure to render and no fetch in flight.
    pub fn is_ready(&self) -> bool {
        !self.did_error
            && !self.is_loading()
            && self.schema().is_some_and(|schema| schema.schema.is_some())
    }

    pub fn should_fetch_on_mount(&self) -> bool {
        self.props.refetch_schema_on_mount || self.schema().is_none()
    }

    /// Values as currently edited.
    pub fn values(&self) -> FormValues {
        self.forms
            .borrow()
            .values(&self.identifier())
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_pristine(&self) -> bool {
        self.forms.borrow().is_pristine(&self.identifier())
    }

    pub fn submit_succeeded(&self) -> bool {
        self.forms.borrow().submit_succeeded(&self.identifier())
    }

    pub fn change(&self, field: &str, value: Value) {
        self.forms
            .borrow_mut()
            .change(&self.identifier(), field, value);
    }

    /// Sets `field` on behalf of another field and flags it as autofilled.
    pub fn autofill(&self, field: &str, value: Value) {
        self.forms
            .borrow_mut()
            .autofill(&self.identifier(), field, value);
    }

    /// Starts a fetch. Returns `None` (and does nothing) while another fetch
    /// for the same URL is in flight.
    pub fn begin_fetch(&mut self, request: SchemaRequest) -> Option<SchemaRequest> {
        if self.is_loading() {
            log::debug!("skipping fetch of {}: already loading", self.props.schema_url);
            return None;
        }
        self.schemas
            .borrow_mut()
            .set_schema_loading(&self.props.schema_url, true);
        self.hooks.on_fetching_schema();
        Some(request)
    }

    /// Applies the outcome of a fetch started with [`FormLoader::begin_fetch`].
    ///
    /// A response with an id and a state is stored (after applying any state
    /// overrides and folding its `errors` into that state) and the form values
    /// are re-initialized from it. Failures are
    /// normalized, reported to `on_loading_error` and returned.
    pub fn complete_fetch(
        &mut self,
        outcome: Result<FormSchema, FetchFailure>,
    ) -> Result<Rc<FormSchema>, ErrorResponse> {
        let url = self.props.schema_url.clone();
        self.schemas.borrow_mut().set_schema_loading(&url, false);

        let form_schema = match outcome {
            Ok(form_schema) => form_schema,
            Err(failure) => {
                log::warn!("fetching form schema {} failed: {}", url, failure);
                self.did_error = true;
                let error = normalise_error(&failure);
                self.hooks.on_loading_error(&error);
                return Err(error);
            }
        };

        match &form_schema.errors {
            Some(errors) => self
                .hooks
                .on_loading_error(&ErrorResponse::new(errors.clone())),
            None => self.hooks.on_loading_success(),
        }

        let Some(state) = form_schema.state.clone() else {
            return Ok(Rc::new(form_schema));
        };
        if form_schema.id.is_none() {
            return Ok(Rc::new(form_schema));
        }

        let state_override = self.schemas.borrow().state_override(&url).cloned();
        let state = match override_state_data(state.clone(), state_override.as_ref()) {
            Ok(overridden) => overridden,
            Err(e) => {
                log::warn!("ignoring state overrides for {}: {}", url, e);
                state
            }
        };

        let previous = self.schema();
        let mut reduced = reduce_schema_errors(
            previous.as_deref(),
            FormSchema {
                state: Some(state),
                ..form_schema
            },
        );
        if reduced.schema.is_none() {
            reduced.schema = previous.as_ref().and_then(|p| p.schema.clone());
        }
        let identifier = create_form_identifier(&self.props.identifier, Some(&reduced));
        let stored = Rc::new(reduced);
        self.schemas
            .borrow_mut()
            .set_schema(&url, stored.clone(), &identifier);

        let values = match (&stored.schema, &stored.state) {
            (Some(structure), Some(state)) => schema_field_values(structure, state),
            _ => FormValues::new(),
        };
        // Initialize again in case the form was loaded before: resets values
        // and pristine state.
        self.forms
            .borrow_mut()
            .initialize(&identifier, values, true);
        self.hooks.on_redux_form_init();

        log::debug!("loaded form schema {} as {}", url, identifier);
        Ok(stored)
    }

    /// Fetches the schema through `transport` and applies the response.
    /// Resolves to `Ok(None)` when a fetch was already in flight.
    pub async fn fetch<T: SchemaTransport + ?Sized>(
        &mut self,
        transport: &T,
        request: SchemaRequest,
    ) -> Result<Option<Rc<FormSchema>>, ErrorResponse> {
        let Some(request) = self.begin_fetch(request) else {
            return Ok(None);
        };
        let outcome = transport.fetch(&self.props.schema_url, &request).await;
        self.complete_fetch(outcome).map(Some)
    }

    /// URL submissions are posted to: the schema's `action`, or the schema URL
    /// when the schema does not name one.
    pub fn submit_url(&self) -> String {
        self.schema()
            .and_then(|schema| schema.schema.as_ref().and_then(|s| s.action.clone()))
            .unwrap_or_else(|| self.props.schema_url.clone())
    }

    /// Builds the submission future, passing it through the submit hook when
    /// one is set.
    ///
    /// # Panics
    ///
    /// Panics when the submit hook returns no future.
    pub fn start_submit<T: SubmitTransport + ?Sized>(
        &self,
        transport: &T,
        values: FormValues,
        action: &str,
    ) -> SubmitFuture {
        let request = SubmitRequest {
            values: values.clone(),
            action: action.to_string(),
        };
        let submission = transport.submit(&self.submit_url(), request);
        match &self.on_submit {
            None => submission,
            Some(hook) => match hook(values, action.to_string(), submission) {
                Some(future) => future,
                None => panic!("Promise was not returned for submitting"),
            },
        }
    }

    /// Applies a submission response.
    ///
    /// The response's errors are merged into the state and the result is
    /// stored before anything else looks at it. When the response carried an
    /// explicit state, the form values are re-initialized from it. Any field
    /// message left after merging turns the result into
    /// [`SubmitError::Validation`].
    pub fn complete_submit(
        &mut self,
        response: Result<Option<FormSchema>, FetchFailure>,
    ) -> Result<Option<Rc<FormSchema>>, SubmitError> {
        let url = self.props.schema_url.clone();
        let identifier = self.identifier();

        let response = match response {
            Ok(response) => response,
            Err(failure) => {
                log::warn!("submitting {} failed: {}", identifier, failure);
                self.forms
                    .borrow_mut()
                    .set_submit_succeeded(&identifier, false);
                return Err(SubmitError::Transport(normalise_error(&failure)));
            }
        };
        let Some(form_schema) = response else {
            self.forms
                .borrow_mut()
                .set_submit_succeeded(&identifier, true);
            return Ok(None);
        };

        let explicit_state = form_schema.state.is_some();
        let previous = self.schema();
        let mut reduced = reduce_schema_errors(previous.as_deref(), form_schema);
        let has_state = reduced.state.is_some();
        if let Some(previous) = &previous {
            if reduced.schema.is_none() {
                reduced.schema = previous.schema.clone();
            }
            if reduced.state.is_none() {
                reduced.state = previous.state.clone();
            }
        }

        // The response may rename the form; key everything by the merged schema.
        let identifier = create_form_identifier(&self.props.identifier, Some(&reduced));
        let stored = Rc::new(reduced);
        self.schemas
            .borrow_mut()
            .set_schema(&url, stored.clone(), &identifier);

        if explicit_state {
            if let (Some(structure), Some(state)) = (&stored.schema, &stored.state) {
                let values = schema_field_values(structure, state);
                self.forms
                    .borrow_mut()
                    .initialize(&identifier, values, true);
            }
        }

        if has_state {
            let messages = stored
                .state
                .as_ref()
                .map(get_messages)
                .unwrap_or_default();
            if !messages.is_empty() {
                self.forms
                    .borrow_mut()
                    .set_submit_succeeded(&identifier, false);
                let by_field: BTreeMap<String, Vec<String>> = messages
                    .into_iter()
                    .map(|(field, message)| (field, vec![message]))
                    .collect();
                return Err(SubmitError::Validation(by_field));
            }
        }

        self.forms
            .borrow_mut()
            .set_submit_succeeded(&identifier, true);
        self.hooks.on_submit_success(&stored);
        Ok(Some(stored))
    }

    /// Submits `values` for `action` through `transport` and applies the
    /// response. See [`FormLoader::start_submit`] and
    /// [`FormLoader::complete_submit`].
    pub async fn submit<T: SubmitTransport + ?Sized>(
        &mut self,
        transport: &T,
        values: FormValues,
        action: &str,
    ) -> Result<Option<Rc<FormSchema>>, SubmitError> {
        let submission = self.start_submit(transport, values, action);
        let response = submission.await;
        self.complete_submit(response)
    }
}
