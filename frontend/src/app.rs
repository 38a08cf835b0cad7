//! Admin shell: loads the client configuration, provides the shared
//! [`AdminContext`] and hosts the page edit form and the toast list.

use admin_common::model::config::ClientConfig;
use admin_common::model::message::MessageType;
use admin_common::store::MessageList;
use gloo_console::error;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::form_builder_loader::FormBuilderLoader;
use crate::components::message_list::MessageList as MessageListComponent;
use crate::context::AdminContext;

const CLIENT_CONFIG_URL: &str = "/admin/client-config";
const DEFAULT_PAGE_ID: i64 = 1;

pub enum Msg {
    ConfigLoaded(ClientConfig),
    ConfigFailed(String),
    AddMessage(String, MessageType),
    DismissMessage(String),
}

pub struct App {
    config: Option<ClientConfig>,
    messages: MessageList,
    admin: AdminContext,
    page_id: i64,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let on_message = ctx
            .link()
            .callback(|(text, message_type)| Msg::AddMessage(text, message_type));
        Self {
            config: None,
            messages: MessageList::new(),
            admin: AdminContext::new(on_message),
            page_id: page_id_from_location().unwrap_or(DEFAULT_PAGE_ID),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ConfigLoaded(config) => {
                self.config = Some(config);
                true
            }
            Msg::ConfigFailed(reason) => {
                error!(format!("Loading client config failed: {}", reason));
                self.messages
                    .add_message("The admin could not be loaded.", MessageType::Error);
                true
            }
            Msg::AddMessage(text, message_type) => {
                self.messages.add_message(text, message_type);
                true
            }
            Msg::DismissMessage(id) => self.messages.remove_message(&id),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let link = ctx.link().clone();
            spawn_local(async move {
                let response = Request::get(CLIENT_CONFIG_URL).send().await;
                match response {
                    Ok(resp) if resp.ok() => match resp.json::<ClientConfig>().await {
                        Ok(config) => link.send_message(Msg::ConfigLoaded(config)),
                        Err(e) => link.send_message(Msg::ConfigFailed(e.to_string())),
                    },
                    Ok(resp) => link.send_message(Msg::ConfigFailed(format!(
                        "HTTP {} {}",
                        resp.status(),
                        resp.status_text()
                    ))),
                    Err(e) => link.send_message(Msg::ConfigFailed(e.to_string())),
                }
            });
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_dismiss = ctx.link().callback(Msg::DismissMessage);
        html! {
            <ContextProvider<AdminContext> context={self.admin.clone()}>
                <div class="cms-container">
                    { self.header() }
                    { self.content() }
                </div>
                <MessageListComponent
                    messages={self.messages.messages().to_vec()}
                    {on_dismiss}
                />
            </ContextProvider<AdminContext>>
        }
    }
}

impl App {
    fn header(&self) -> Html {
        let Some(config) = &self.config else {
            return Html::default();
        };
        html! {
            <header class="cms-menu">
                <span class="cms-version">{ format!("Version {}", config.version) }</span>
                <ul class="cms-help__links">
                    { for config.help_links.iter().map(|link| html! {
                        <li>
                            <a href={link.url.clone()} target="_blank" rel="noopener noreferrer">
                                { link.title.clone() }
                            </a>
                        </li>
                    }) }
                </ul>
            </header>
        }
    }

    fn content(&self) -> Html {
        let Some(section) = self
            .config
            .as_ref()
            .and_then(|config| config.sections.get("pages"))
        else {
            return html! { <div class="cms-content-loading-spinner" /> };
        };
        let schema_url = format!("{}/{}", section.form_schema_url, self.page_id);
        html! {
            <main class="cms-content">
                <FormBuilderLoader
                    identifier="Pages"
                    {schema_url}
                    context={Some("pages".to_string())}
                />
            </main>
        }
    }
}

/// Page to edit, from the `?id=` query parameter.
fn page_id_from_location() -> Option<i64> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("id")?.parse().ok()
}
