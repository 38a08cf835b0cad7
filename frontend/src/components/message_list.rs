//! Toast rendering of the app's message list.
//!
//! Each message is shown once, as a toast appended to `<body>`, and removed
//! from the list right away through `on_dismiss`; the toast itself stays on
//! screen for [`TOAST_STAY_MS`].

use admin_common::model::message::{Message, MessageType};
use std::collections::HashSet;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

pub const TOAST_STAY_MS: u32 = 5000;

#[derive(Properties, PartialEq, Clone)]
pub struct MessageListProps {
    pub messages: Vec<Message>,
    pub on_dismiss: Callback<String>,
}

pub struct MessageList {
    shown: HashSet<String>,
}

impl Component for MessageList {
    type Message = ();
    type Properties = MessageListProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            shown: HashSet::new(),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! { <div class="message-list" aria-live="polite" /> }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        for message in &ctx.props().messages {
            if self.shown.insert(message.id.clone()) {
                show_toast(&message.text, message.message_type);
                ctx.props().on_dismiss.emit(message.id.clone());
            }
        }
    }
}

fn background(message_type: MessageType) -> &'static str {
    match message_type {
        MessageType::Success => "rgba(46, 125, 50, 0.9)",
        MessageType::Notice => "rgba(0, 0, 0, 0.8)",
        MessageType::Error => "rgba(198, 40, 40, 0.9)",
    }
}

/// Displays `message` in a toast at the bottom of the screen.
pub fn show_toast(message: &str, message_type: MessageType) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", background(message_type)).ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(TOAST_STAY_MS).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
