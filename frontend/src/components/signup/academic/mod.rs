//! Academic-info signup step: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic, view rendering and
//! helpers.
//!
//! On first render the college directory is fetched from `/api/colleges`; if
//! that fails the built-in list stays in place and the user gets a toast.

use gloo_console::warn;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

use helpers::show_toast;
pub use messages::Msg;
pub use props::AcademicInfoProps;
pub use state::AcademicInfoStep;

const COLLEGES_URL: &str = "/api/colleges";

impl Component for AcademicInfoStep {
    type Message = Msg;
    type Properties = AcademicInfoProps;

    fn create(_ctx: &Context<Self>) -> Self {
        AcademicInfoStep::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::get(COLLEGES_URL).send().await {
                    Ok(resp) if resp.ok() => match resp.json::<Vec<String>>().await {
                        Ok(names) => link.send_message(Msg::DirectoryLoaded(names)),
                        Err(err) => fall_back(&err.to_string()),
                    },
                    Ok(resp) => fall_back(&format!("status {}", resp.status())),
                    Err(err) => fall_back(&err.to_string()),
                }
            });
        }
    }
}

fn fall_back(reason: &str) {
    warn!(format!("college directory unavailable: {reason}"));
    show_toast("Could not load the college list. Showing the default colleges.");
}
