//! Fixtures and in-memory services shared by the settings tests.

use std::cell::RefCell;

use async_trait::async_trait;
use serde_json::json;

use crate::model::datasource::{ControlDescriptor, DataSourceRecord};
use crate::model::provider::ProvidersData;
use crate::model::survey::{Survey, SurveyAttribute, SurveyId, SurveyList};
use crate::requests::AttributeQuery;
use crate::settings::error::SettingsError;
use crate::settings::i18n::TranslationCatalog;
use crate::settings::services::{
    ConfigService, ConfirmModalService, ConfirmOptions, DataSourcesService, FormsService, Navigator,
    SurveysService, Translator,
};

pub fn providers_data() -> ProvidersData {
    serde_json::from_value(json!({
        "providers": { "typeform": true, "gravity": false, "alchemer": false },
        "typeform": {
            "api_key": "secret",
            "region": "eu",
            "legacy_flag": true,
            "form_id": 12,
            "inbound_fields": { "email": "title", "name": "values.q1" },
        },
        "gravity": { "endpoint": "https://" },
    }))
    .expect("fixture is a valid providers document")
}

pub fn data_source_records() -> Vec<DataSourceRecord> {
    vec![
        DataSourceRecord {
            id: "typeform".to_string(),
            name: "Typeform".to_string(),
            visible_survey: true,
            control_options: vec![
                ControlDescriptor::new("api_key", "").required(),
                ControlDescriptor::new("region", ""),
            ],
            control_inbound_fields: vec![
                ControlDescriptor::new("inbound_email", "").with_key("email"),
                ControlDescriptor::new("inbound_name", "").with_key("name"),
            ],
        },
        DataSourceRecord {
            id: "gravity".to_string(),
            name: "Gravity".to_string(),
            visible_survey: false,
            control_options: vec![ControlDescriptor::new("endpoint", "https://").required()],
            control_inbound_fields: Vec::new(),
        },
        DataSourceRecord {
            id: "alchemer".to_string(),
            name: "Alchemer".to_string(),
            visible_survey: true,
            control_options: vec![ControlDescriptor::new("token", "").required()],
            control_inbound_fields: vec![ControlDescriptor::new("inbound_email", "").with_key("email")],
        },
    ]
}

pub fn surveys() -> SurveyList {
    SurveyList {
        results: vec![Survey::new(12, "Onboarding"), Survey::new(15, "NPS")],
    }
}

pub fn attributes(survey_id: SurveyId) -> Vec<SurveyAttribute> {
    match survey_id {
        12 => vec![
            SurveyAttribute::new("survey_title", "title"),
            SurveyAttribute::new("survey_intro", "description"),
            SurveyAttribute::new("q1", "text"),
        ],
        15 => vec![
            SurveyAttribute::new("nps_title", "title"),
            SurveyAttribute::new("score", "number"),
        ],
        _ => Vec::new(),
    }
}

/// In-memory services recording every call.
pub struct MockServices {
    pub providers_data: ProvidersData,
    pub confirm_answer: bool,
    pub failing_source: Option<&'static str>,
    pub updates: RefCell<Vec<ProvidersData>>,
    pub navigations: RefCell<Vec<String>>,
    pub confirmations: RefCell<Vec<ConfirmOptions>>,
    pub attribute_requests: RefCell<Vec<(SurveyId, AttributeQuery)>>,
    pub translations: TranslationCatalog,
}

impl MockServices {
    pub fn new() -> Self {
        Self {
            providers_data: providers_data(),
            confirm_answer: true,
            failing_source: None,
            updates: RefCell::new(Vec::new()),
            navigations: RefCell::new(Vec::new()),
            confirmations: RefCell::new(Vec::new()),
            attribute_requests: RefCell::new(Vec::new()),
            translations: TranslationCatalog::spanish(),
        }
    }

    fn fail(&self, source_name: &'static str) -> Result<(), SettingsError> {
        match self.failing_source {
            Some(failing) if failing == source_name => {
                Err(SettingsError::fetch(source_name, "503 Service Unavailable"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl ConfigService for MockServices {
    async fn get_providers_data(&self, _force_refresh: bool) -> Result<ProvidersData, SettingsError> {
        self.fail("providers")?;
        Ok(self.providers_data.clone())
    }

    async fn update_providers(&self, providers_data: &ProvidersData) -> Result<(), SettingsError> {
        if self.failing_source == Some("update") {
            return Err(SettingsError::Persist("500 Internal Server Error".to_string()));
        }
        self.updates.borrow_mut().push(providers_data.clone());
        Ok(())
    }
}

#[async_trait(?Send)]
impl SurveysService for MockServices {
    async fn get(&self) -> Result<SurveyList, SettingsError> {
        self.fail("surveys")?;
        Ok(surveys())
    }
}

#[async_trait(?Send)]
impl DataSourcesService for MockServices {
    async fn get_data_source(&self) -> Result<Vec<DataSourceRecord>, SettingsError> {
        self.fail("data sources")?;
        Ok(data_source_records())
    }
}

#[async_trait(?Send)]
impl FormsService for MockServices {
    async fn get_attributes(
        &self,
        survey_id: SurveyId,
        query: &AttributeQuery,
    ) -> Result<Vec<SurveyAttribute>, SettingsError> {
        self.fail("survey attributes")?;
        self.attribute_requests.borrow_mut().push((survey_id, query.clone()));
        Ok(attributes(survey_id))
    }
}

#[async_trait(?Send)]
impl ConfirmModalService for MockServices {
    async fn open(&self, options: ConfirmOptions) -> bool {
        self.confirmations.borrow_mut().push(options);
        self.confirm_answer
    }
}

impl Translator for MockServices {
    fn instant(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.translations.instant(key, params)
    }
}

impl Navigator for MockServices {
    fn navigate(&self, path: &str) {
        self.navigations.borrow_mut().push(path.to_string());
    }
}
