//! Shared client state handed to every form through a Yew context.

use admin_common::model::message::MessageType;
use admin_common::store::{FormValuesStore, SchemaStore};
use std::cell::RefCell;
use std::rc::Rc;
use yew::Callback;

use crate::registry::{default_registry, AdminRegistry};

#[derive(Clone)]
pub struct AdminContext {
    pub schemas: Rc<RefCell<SchemaStore>>,
    pub forms: Rc<RefCell<FormValuesStore>>,
    pub registry: Rc<AdminRegistry>,
    /// Queues a toast message in the app's message list.
    pub on_message: Callback<(String, MessageType)>,
}

impl AdminContext {
    pub fn new(on_message: Callback<(String, MessageType)>) -> Self {
        Self {
            schemas: Rc::new(RefCell::new(SchemaStore::new())),
            forms: Rc::new(RefCell::new(FormValuesStore::new())),
            registry: Rc::new(default_registry()),
            on_message,
        }
    }

    /// Stores private to one form, for forms mounted outside the app.
    pub fn standalone() -> Self {
        Self::new(Callback::noop())
    }
}

impl PartialEq for AdminContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.schemas, &other.schemas)
            && Rc::ptr_eq(&self.forms, &other.forms)
            && Rc::ptr_eq(&self.registry, &other.registry)
            && self.on_message == other.on_message
    }
}
