use crate::app::App;

mod app;
mod components;
mod context;
mod registry;
mod transport;

fn main() {
    yew::Renderer::<App>::new().render();
}
