use crate::app::App;

mod app;
mod components;
mod option_grid;

fn main() {
    yew::Renderer::<App>::new().render();
}
