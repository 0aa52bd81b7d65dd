//! Data-source provider settings page: root module wiring the Yew
//! `Component` implementation with its state, update logic and view.
//!
//! On first render the page dispatches `Action::Initialize` with the route's
//! provider id; everything after that flows through `update::update`.

use yew::prelude::*;

use common::settings::Action;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use helpers::{current_route_id, load_config};
use messages::Msg;
use props::DataSourceItemProps;
pub use state::DataSourceItemComponent;

impl Component for DataSourceItemComponent {
    type Message = Msg;
    type Properties = DataSourceItemProps;

    fn create(ctx: &Context<Self>) -> Self {
        DataSourceItemComponent::new(ctx.props())
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
            ctx.link().send_message(Msg::Dispatch(Action::Initialize {
                route_id: ctx.props().route_id.clone(),
            }));
        }
    }
}
