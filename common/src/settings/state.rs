//! State machine of the data-source settings page.
//!
//! [`DataSourceItem::dispatch`] is the single entry point: it applies an
//! [`Action`] synchronously and returns the [`Effect`]s the host has to run.
//! Rebuilding the form for a provider happens inside one dispatch, so a host
//! never renders a half-built field set.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::model::datasource::{ControlDescriptor, DataSourceBinding};
use crate::model::provider::{AvailableProvider, ProviderSettings, ProvidersData};
use crate::model::survey::{Survey, SurveyAttribute, SurveyId};
use crate::requests::AttributeQuery;
use crate::settings::codec::{decode, encode, find_by_key};
use crate::settings::config::SettingsConfig;
use crate::settings::error::SettingsError;
use crate::settings::form::{FieldValue, FormControl, FormGroup, Validator};
use crate::settings::loader::{get_available_providers, LoadBarrier, LoadedSources, SourceUpdate};
use crate::settings::merge::combine_data_source;

pub const ID_CONTROL: &str = "id";
pub const FORM_ID_CONTROL: &str = "form_id";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Page opened, optionally on the route of an existing provider.
    Initialize { route_id: Option<String> },
    SourceUpdated(SourceUpdate),
    /// All three sources fetched together, merged once.
    SourcesLoaded(LoadedSources),
    SelectProvider(Option<String>),
    SelectSurvey(Option<Survey>),
    AttributesLoaded {
        survey_id: SurveyId,
        attributes: Vec<SurveyAttribute>,
    },
    /// User edit of a single form control.
    PatchField { name: String, value: FieldValue },
    Save,
    Toggle { checked: bool },
    ConfirmResolved { checked: bool, confirmed: bool },
    Persisted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the providers document, the survey list and the data-source records.
    LoadSources { force_refresh: bool },
    FetchAttributes {
        survey_id: SurveyId,
        query: AttributeQuery,
    },
    Confirm(ConfirmRequest),
    Persist(ProvidersData),
    Navigate(String),
}

/// Disconnect confirmation to show for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub provider_name: String,
    pub checked: bool,
}

#[derive(Debug, Clone)]
struct PendingToggle {
    provider_id: String,
    previous: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct DataSourceItem {
    config: SettingsConfig,
    barrier: LoadBarrier,
    providers_data: Option<ProvidersData>,
    available_providers: Vec<AvailableProvider>,
    survey_list: Vec<Survey>,
    data_source_list: Vec<DataSourceBinding>,
    current_provider_id: Option<String>,
    provider_id: Option<String>,
    form: FormGroup,
    selected_survey: Option<Survey>,
    survey_attributes: Vec<SurveyAttribute>,
    on_creating: bool,
    pending_toggle: Option<PendingToggle>,
}

impl DataSourceItem {
    pub fn new(config: SettingsConfig) -> Self {
        Self {
            config,
            barrier: LoadBarrier::default(),
            providers_data: None,
            available_providers: Vec::new(),
            survey_list: Vec::new(),
            data_source_list: Vec::new(),
            current_provider_id: None,
            provider_id: None,
            form: FormGroup::new(),
            selected_survey: None,
            survey_attributes: Vec::new(),
            on_creating: false,
            pending_toggle: None,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Effect>, SettingsError> {
        match action {
            Action::Initialize { route_id } => Ok(self.initialize(route_id)),
            Action::SourceUpdated(update) => match self.barrier.update(update) {
                Some(sources) => self.apply_sources(sources),
                None => Ok(Vec::new()),
            },
            Action::SourcesLoaded(sources) => {
                let sources = self.barrier.replace(sources);
                self.apply_sources(sources)
            }
            Action::SelectProvider(provider_id) => self.set_current_provider(provider_id),
            Action::SelectSurvey(survey) => Ok(self.resolve_survey_attributes(survey)),
            Action::AttributesLoaded { survey_id, attributes } => {
                self.apply_attributes(survey_id, attributes);
                Ok(Vec::new())
            }
            Action::PatchField { name, value } => {
                self.form.patch_value([(name, value)]);
                Ok(Vec::new())
            }
            Action::Save => self.save(),
            Action::Toggle { checked } => self.toggle(checked),
            Action::ConfirmResolved { checked, confirmed } => self.confirm_toggle(checked, confirmed),
            Action::Persisted => Ok(vec![self.navigate_to_list()]),
        }
    }

    fn initialize(&mut self, route_id: Option<String>) -> Vec<Effect> {
        if route_id.is_none() {
            self.on_creating = true;
        }
        self.current_provider_id = route_id;
        vec![Effect::LoadSources { force_refresh: true }]
    }

    fn apply_sources(&mut self, sources: LoadedSources) -> Result<Vec<Effect>, SettingsError> {
        let LoadedSources { providers, surveys, data_sources } = sources;

        self.available_providers = get_available_providers(&providers.providers);
        self.survey_list = surveys.results;
        self.data_source_list = combine_data_source(&providers, &data_sources, &self.survey_list);
        self.providers_data = Some(providers);
        debug!(
            "Merged {} data source(s), {} provider(s) available.",
            self.data_source_list.len(),
            self.available_providers.len()
        );

        self.set_current_provider(None)
    }

    fn set_current_provider(&mut self, provider_id: Option<String>) -> Result<Vec<Effect>, SettingsError> {
        if self.current_provider_id.is_none() && provider_id.is_none() {
            self.current_provider_id = self.available_providers.first().map(|provider| provider.id.clone());
        }

        let Some(id) = provider_id.or_else(|| self.current_provider_id.clone()) else {
            debug!("No data source to configure, leaving the settings page.");
            return Ok(vec![self.navigate_to_list()]);
        };

        let provider = self
            .data_source_list
            .iter()
            .find(|binding| binding.id == id)
            .cloned()
            .ok_or_else(|| SettingsError::ProviderNotFound(id.clone()))?;

        self.current_provider_id = Some(id.clone());
        self.provider_id = Some(id);
        self.selected_survey = None;
        self.survey_attributes.clear();

        self.form.remove_all();
        build_form(&mut self.form, &provider);
        debug!("Built form for data source <{}> with {} control(s).", provider.id, self.form.len());

        Ok(self.resolve_survey_attributes(provider.selected_survey))
    }

    fn resolve_survey_attributes(&mut self, survey: Option<Survey>) -> Vec<Effect> {
        let Some(survey) = survey else {
            return Vec::new();
        };

        self.form.patch_value([(FORM_ID_CONTROL, FieldValue::Survey(survey.clone()))]);
        let survey_id = survey.id;
        self.selected_survey = Some(survey);

        vec![Effect::FetchAttributes {
            survey_id,
            query: self.config.attribute_query.clone(),
        }]
    }

    fn apply_attributes(&mut self, survey_id: SurveyId, attributes: Vec<SurveyAttribute>) {
        if self.selected_survey.as_ref().map(|survey| survey.id) != Some(survey_id) {
            debug!("Ignoring attributes of survey <{survey_id}>, it is no longer selected.");
            return;
        }
        self.survey_attributes = attributes;

        let Some(provider) = self.provider() else {
            return;
        };
        let patches: Vec<(String, FieldValue)> = provider
            .control_inbound_fields
            .iter()
            .map(|field| {
                let decoded = decode(field.control_value.as_str(), &self.survey_attributes);
                (field.control_label.clone(), FieldValue::from(decoded))
            })
            .collect();

        self.form.patch_value(patches);
    }

    fn save(&mut self) -> Result<Vec<Effect>, SettingsError> {
        let provider = self.provider().cloned().ok_or(SettingsError::NoProviderSelected)?;

        // The form keeps attribute keys; only the outgoing catalog carries encodings.
        let survey_bound = self.form.get(FORM_ID_CONTROL).is_some_and(FieldValue::is_set);
        let encoded: BTreeMap<String, String> = if survey_bound {
            provider
                .control_inbound_fields
                .iter()
                .map(|field| {
                    let attribute = self
                        .form
                        .get(&field.control_label)
                        .and_then(FieldValue::as_text)
                        .and_then(|key| find_by_key(&self.survey_attributes, key));
                    (field.control_label.clone(), encode(attribute))
                })
                .collect()
        } else {
            BTreeMap::new()
        };

        let providers_data = self.providers_data.as_mut().ok_or(SettingsError::NotLoaded)?;
        let provider_key = self
            .form
            .get(ID_CONTROL)
            .and_then(FieldValue::as_text)
            .unwrap_or(provider.id.as_str());

        match providers_data.settings.get_mut(provider_key) {
            Some(settings) => apply_form(settings, &self.form, &provider, &encoded),
            None => warn!("No stored settings for data source <{provider_key}>, saving the catalog only."),
        }

        info!("Saving settings of data source <{}>.", provider.id);
        Ok(vec![Effect::Persist(providers_data.clone())])
    }

    fn toggle(&mut self, checked: bool) -> Result<Vec<Effect>, SettingsError> {
        let provider = self.provider().ok_or(SettingsError::NoProviderSelected)?;
        let provider_id = provider.id.clone();
        let provider_name = provider.name.clone();
        let providers_data = self.providers_data.as_mut().ok_or(SettingsError::NotLoaded)?;

        if !checked {
            let previous = providers_data.set_flag(&provider_id, checked);
            self.pending_toggle = Some(PendingToggle { provider_id, previous });
            return Ok(vec![Effect::Confirm(ConfirmRequest { provider_name, checked })]);
        }

        self.commit_toggle(checked)
    }

    fn confirm_toggle(&mut self, checked: bool, confirmed: bool) -> Result<Vec<Effect>, SettingsError> {
        let pending = self.pending_toggle.take();

        if !confirmed {
            if let (Some(pending), Some(providers_data)) = (pending, self.providers_data.as_mut()) {
                providers_data.restore_flag(&pending.provider_id, pending.previous);
            }
            if let Some(provider) = self.provider_mut() {
                provider.available_provider = true;
            }
            debug!("Disconnect declined, keeping the data source enabled.");
            return Ok(Vec::new());
        }

        self.commit_toggle(checked)
    }

    fn commit_toggle(&mut self, checked: bool) -> Result<Vec<Effect>, SettingsError> {
        let provider_id = self.provider_id.clone().ok_or(SettingsError::NoProviderSelected)?;
        let providers_data = self.providers_data.as_mut().ok_or(SettingsError::NotLoaded)?;

        providers_data.set_flag(&provider_id, checked);
        self.on_creating = false;

        info!("Setting data source <{provider_id}> enabled={checked}.");
        Ok(vec![Effect::Persist(providers_data.clone())])
    }

    fn navigate_to_list(&self) -> Effect {
        Effect::Navigate(self.config.data_sources_route.clone())
    }

    fn provider_mut(&mut self) -> Option<&mut DataSourceBinding> {
        let id = self.provider_id.as_ref()?;
        self.data_source_list.iter_mut().find(|binding| &binding.id == id)
    }

    /// Binding of the provider whose form is currently built.
    pub fn provider(&self) -> Option<&DataSourceBinding> {
        let id = self.provider_id.as_ref()?;
        self.data_source_list.iter().find(|binding| &binding.id == id)
    }

    pub fn form(&self) -> &FormGroup {
        &self.form
    }

    pub fn config(&self) -> &SettingsConfig {
        &self.config
    }

    pub fn providers_data(&self) -> Option<&ProvidersData> {
        self.providers_data.as_ref()
    }

    pub fn available_providers(&self) -> &[AvailableProvider] {
        &self.available_providers
    }

    pub fn survey_list(&self) -> &[Survey] {
        &self.survey_list
    }

    pub fn survey_by_id(&self, survey_id: SurveyId) -> Option<&Survey> {
        self.survey_list.iter().find(|survey| survey.id == survey_id)
    }

    pub fn data_source_list(&self) -> &[DataSourceBinding] {
        &self.data_source_list
    }

    pub fn current_provider_id(&self) -> Option<&str> {
        self.current_provider_id.as_deref()
    }

    pub fn selected_survey(&self) -> Option<&Survey> {
        self.selected_survey.as_ref()
    }

    pub fn survey_attributes(&self) -> &[SurveyAttribute] {
        &self.survey_attributes
    }

    pub fn on_creating(&self) -> bool {
        self.on_creating
    }

    pub fn is_loaded(&self) -> bool {
        self.barrier.is_ready()
    }
}

impl Default for DataSourceItem {
    fn default() -> Self {
        Self::new(SettingsConfig::default())
    }
}

fn build_form(form: &mut FormGroup, provider: &DataSourceBinding) {
    form.add_control(
        FormControl::new(ID_CONTROL, FieldValue::Text(provider.id.clone()))
            .with_validators([Validator::Required]),
    );
    form.add_control(FormControl::new(
        FORM_ID_CONTROL,
        provider.selected_survey.clone().map_or(FieldValue::Empty, FieldValue::Survey),
    ));

    for descriptor in provider.control_options.iter().chain(&provider.control_inbound_fields) {
        form.add_control(control_for(descriptor));
    }
}

fn control_for(descriptor: &ControlDescriptor) -> FormControl {
    let validators = descriptor.rule_names().filter_map(Validator::from_rule);
    FormControl::new(
        descriptor.control_label.clone(),
        FieldValue::from_json(&descriptor.control_value),
    )
    .with_validators(validators)
}

/// Writes the form back into the stored settings of its provider.
fn apply_form(
    settings: &mut ProviderSettings,
    form: &FormGroup,
    provider: &DataSourceBinding,
    encoded: &BTreeMap<String, String>,
) {
    settings.options = settings
        .options
        .keys()
        .filter_map(|key| form.get(key).map(|value| (key.clone(), value.to_json())))
        .collect();

    if !provider.visible_survey {
        settings.form_id = None;
        settings.inbound_fields = None;
        return;
    }

    settings.form_id = form
        .get(FORM_ID_CONTROL)
        .and_then(FieldValue::as_survey)
        .map(|survey| survey.id);

    settings.inbound_fields = settings.form_id.map(|_| {
        provider
            .control_inbound_fields
            .iter()
            .filter_map(|field| {
                let Some(key) = field.key.clone() else {
                    warn!("Inbound field <{}> has no attribute key, skipping it.", field.control_label);
                    return None;
                };
                let value = encoded.get(&field.control_label).cloned().unwrap_or_default();
                Some((key, value))
            })
            .collect()
    });
}
