//! Browser-side implementation of the settings page collaborators.
//!
//! - HTTP services talk JSON to the backend with `gloo-net`, under the
//!   configured API base.
//! - The disconnect confirmation uses the native `window.confirm` dialog,
//!   which shows the title and description but not custom button labels.
//! - Navigation assigns `window.location`.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;

use common::model::datasource::DataSourceRecord;
use common::model::provider::ProvidersData;
use common::model::survey::{SurveyAttribute, SurveyId, SurveyList};
use common::requests::AttributeQuery;
use common::settings::config::SettingsConfig;
use common::settings::i18n::TranslationCatalog;
use common::settings::services::{
    ConfigService, ConfirmModalService, ConfirmOptions, DataSourcesService, FormsService, Navigator,
    SurveysService, Translator,
};
use common::settings::SettingsError;

pub struct HttpServices {
    config: SettingsConfig,
    translations: TranslationCatalog,
}

impl HttpServices {
    pub fn new(config: SettingsConfig, translations: TranslationCatalog) -> Self {
        Self { config, translations }
    }

    async fn fetch_json<T: DeserializeOwned>(
        source_name: &'static str,
        request: RequestBuilder,
    ) -> Result<T, SettingsError> {
        let response = request
            .send()
            .await
            .map_err(|cause| SettingsError::fetch(source_name, cause))?;

        if !response.ok() {
            return Err(SettingsError::fetch(
                source_name,
                format!("{} {}", response.status(), response.status_text()),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|cause| SettingsError::fetch(source_name, cause))
    }
}

#[async_trait(?Send)]
impl ConfigService for HttpServices {
    async fn get_providers_data(&self, force_refresh: bool) -> Result<ProvidersData, SettingsError> {
        let request = Request::get(&self.config.endpoint("config/providers"))
            .query([("refresh", force_refresh.to_string())]);
        Self::fetch_json("providers", request).await
    }

    async fn update_providers(&self, providers_data: &ProvidersData) -> Result<(), SettingsError> {
        let response = Request::put(&self.config.endpoint("config/providers"))
            .json(providers_data)
            .map_err(|cause| SettingsError::Persist(cause.to_string()))?
            .send()
            .await
            .map_err(|cause| SettingsError::Persist(cause.to_string()))?;

        if !response.ok() {
            return Err(SettingsError::Persist(format!(
                "{} {}",
                response.status(),
                response.status_text()
            )));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl SurveysService for HttpServices {
    async fn get(&self) -> Result<SurveyList, SettingsError> {
        Self::fetch_json("surveys", Request::get(&self.config.endpoint("surveys"))).await
    }
}

#[async_trait(?Send)]
impl DataSourcesService for HttpServices {
    async fn get_data_source(&self) -> Result<Vec<DataSourceRecord>, SettingsError> {
        Self::fetch_json("data sources", Request::get(&self.config.endpoint("data-sources"))).await
    }
}

#[async_trait(?Send)]
impl FormsService for HttpServices {
    async fn get_attributes(
        &self,
        survey_id: SurveyId,
        query: &AttributeQuery,
    ) -> Result<Vec<SurveyAttribute>, SettingsError> {
        let url = self.config.endpoint(&format!("forms/{survey_id}/attributes"));
        let request = Request::get(&url).query(query.to_query_pairs());
        Self::fetch_json("survey attributes", request).await
    }
}

#[async_trait(?Send)]
impl ConfirmModalService for HttpServices {
    async fn open(&self, options: ConfirmOptions) -> bool {
        let message = format!("{}\n\n{}", options.title, options.description);
        web_sys::window()
            .and_then(|window| window.confirm_with_message(&message).ok())
            .unwrap_or(false)
    }
}

impl Translator for HttpServices {
    fn instant(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.translations.instant(key, params)
    }
}

impl Navigator for HttpServices {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(cause) = window.location().set_href(path) {
            log::error!("Failed to navigate to {path}: {cause:?}");
        }
    }
}
