use crate::app::App;

mod app;
mod components;
mod services;

fn main() {
    console_log::init_with_level(log::Level::Info).expect("logger is initialized once");
    yew::Renderer::<App>::new().render();
}
