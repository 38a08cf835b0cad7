//! Schema-driven form: loads a form schema from the server, renders it through
//! the component registry and posts it back.
//!
//! Responsibilities
//! - Resolve the shared stores and registry from the `AdminContext` (or fall
//!   back to private ones when mounted outside the app).
//! - On first render, fetch the schema unless the store already holds it.
//! - Re-create the loader and fetch again when `schema_url` or `identifier`
//!   change.
//! - Delegate messages to `update::update` and drawing to `view::view`.

use admin_common::form::SchemaRequest;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

use helpers::set_window_dirty_flag;
pub use messages::Msg;
pub use props::FormBuilderLoaderProps;
pub use state::FormBuilderLoader;

use crate::context::AdminContext;

impl Component for FormBuilderLoader {
    type Message = Msg;
    type Properties = FormBuilderLoaderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let admin = ctx
            .link()
            .context::<AdminContext>(Callback::noop())
            .map(|(admin, _handle)| admin)
            .unwrap_or_else(AdminContext::standalone);
        FormBuilderLoader::new(ctx.props(), admin)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props() != old_props {
            self.reset(ctx.props());
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if !self.loaded {
            self.loaded = true;
            if self.loader.should_fetch_on_mount() {
                ctx.link().send_message(Msg::Fetch(SchemaRequest::default()));
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        set_window_dirty_flag(false);
    }
}
