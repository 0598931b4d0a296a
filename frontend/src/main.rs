use crate::app::App;

mod api;
mod app;
mod scanner;
mod store;

fn main() {
    yew::Renderer::<App>::new().render();
}
