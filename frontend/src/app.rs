use crate::components::data_sources::provider::{current_route_id, load_config, DataSourceItemComponent};
use common::settings::config::SettingsConfig;
use yew::{html, Component, Context, Html};

pub struct App {
    config: SettingsConfig,
    route_id: Option<String>,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = load_config();
        let route_id = current_route_id(&config);
        Self { config, route_id }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div>
                <DataSourceItemComponent route_id={self.route_id.clone()} config={self.config.clone()} />
            </div>
        }
    }
}
