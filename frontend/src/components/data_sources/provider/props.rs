//! Properties of the `DataSourceItemComponent`.

use yew::prelude::*;

use common::settings::config::SettingsConfig;

#[derive(Properties, PartialEq, Clone)]
pub struct DataSourceItemProps {
    /// Provider to edit, taken from the route. `None` opens the page in
    /// creation mode on the first provider that is not configured yet.
    #[prop_or_default]
    pub route_id: Option<String>,

    #[prop_or_default]
    pub config: SettingsConfig,
}
