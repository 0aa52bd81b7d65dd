//! Runtime state of the `DataSourceItemComponent`.

use std::rc::Rc;

use common::settings::i18n::TranslationCatalog;
use common::settings::DataSourceItem;

use super::props::DataSourceItemProps;
use crate::services::HttpServices;

pub struct DataSourceItemComponent {
    /// Headless page state: catalog, bindings and the dynamic form.
    pub item: DataSourceItem,

    /// Collaborators shared with the effects running on `spawn_local`.
    pub services: Rc<HttpServices>,

    /// Last failure, shown instead of the form while nothing is loaded.
    pub error: Option<String>,

    /// A persistence request is in flight; actions are disabled.
    pub saving: bool,

    /// Guards the one-time initialization on first render.
    pub loaded: bool,
}

impl DataSourceItemComponent {
    pub fn new(props: &DataSourceItemProps) -> Self {
        Self {
            item: DataSourceItem::new(props.config.clone()),
            services: Rc::new(HttpServices::new(
                props.config.clone(),
                TranslationCatalog::spanish(),
            )),
            error: None,
            saving: false,
            loaded: false,
        }
    }
}
