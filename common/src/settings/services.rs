//! Contracts of the collaborators the settings page talks to.
//!
//! Everything runs on a single-threaded event loop, so the async traits
//! are `?Send`.

use async_trait::async_trait;

use crate::model::datasource::DataSourceRecord;
use crate::model::provider::ProvidersData;
use crate::model::survey::{SurveyAttribute, SurveyId, SurveyList};
use crate::requests::AttributeQuery;
use crate::settings::error::SettingsError;

#[async_trait(?Send)]
pub trait ConfigService {
    async fn get_providers_data(&self, force_refresh: bool) -> Result<ProvidersData, SettingsError>;

    async fn update_providers(&self, providers_data: &ProvidersData) -> Result<(), SettingsError>;
}

#[async_trait(?Send)]
pub trait SurveysService {
    async fn get(&self) -> Result<SurveyList, SettingsError>;
}

#[async_trait(?Send)]
pub trait DataSourcesService {
    async fn get_data_source(&self) -> Result<Vec<DataSourceRecord>, SettingsError>;
}

#[async_trait(?Send)]
pub trait FormsService {
    async fn get_attributes(
        &self,
        survey_id: SurveyId,
        query: &AttributeQuery,
    ) -> Result<Vec<SurveyAttribute>, SettingsError>;
}

/// Texts of a yes/no confirmation modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub title: String,
    pub description: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

#[async_trait(?Send)]
pub trait ConfirmModalService {
    /// Resolves to `true` when the user confirms. Declining is not an error.
    async fn open(&self, options: ConfirmOptions) -> bool;
}

pub trait Translator {
    fn instant(&self, key: &str, params: &[(&str, &str)]) -> String;
}

pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Everything the settings page needs, implemented by one service bundle.
pub trait SettingsServices:
    ConfigService
    + SurveysService
    + DataSourcesService
    + FormsService
    + ConfirmModalService
    + Translator
    + Navigator
{
}

impl<T> SettingsServices for T where
    T: ConfigService
        + SurveysService
        + DataSourcesService
        + FormsService
        + ConfirmModalService
        + Translator
        + Navigator
{
}
