use std::collections::VecDeque;

use futures_util::try_join;
use log::{debug, error};

use crate::model::survey::Survey;
use crate::settings::error::SettingsError;
use crate::settings::form::FieldValue;
use crate::settings::i18n;
use crate::settings::loader::LoadedSources;
use crate::settings::services::{
    ConfigService, ConfirmModalService, ConfirmOptions, DataSourcesService, FormsService, Navigator,
    SettingsServices, SurveysService, Translator,
};
use crate::settings::state::{Action, ConfirmRequest, DataSourceItem, Effect};

/// Runs one effect and returns the actions reporting its outcome.
pub async fn perform<S>(effect: Effect, services: &S) -> Result<Vec<Action>, SettingsError>
where
    S: SettingsServices + ?Sized,
{
    match effect {
        Effect::LoadSources { force_refresh } => {
            let (providers, surveys, data_sources) = try_join!(
                ConfigService::get_providers_data(services, force_refresh),
                SurveysService::get(services),
                DataSourcesService::get_data_source(services),
            )?;
            Ok(vec![Action::SourcesLoaded(LoadedSources {
                providers,
                surveys,
                data_sources,
            })])
        }
        Effect::FetchAttributes { survey_id, query } => {
            let attributes = FormsService::get_attributes(services, survey_id, &query).await?;
            Ok(vec![Action::AttributesLoaded { survey_id, attributes }])
        }
        Effect::Confirm(request) => {
            let options = confirm_options(&request, services);
            let confirmed = ConfirmModalService::open(services, options).await;
            Ok(vec![Action::ConfirmResolved { checked: request.checked, confirmed }])
        }
        Effect::Persist(providers_data) => {
            ConfigService::update_providers(services, &providers_data).await?;
            Ok(vec![Action::Persisted])
        }
        Effect::Navigate(path) => {
            Navigator::navigate(services, &path);
            Ok(Vec::new())
        }
    }
}

/// Localized texts of the disconnect confirmation.
pub fn confirm_options<T>(request: &ConfirmRequest, translator: &T) -> ConfirmOptions
where
    T: Translator + ?Sized,
{
    ConfirmOptions {
        title: translator.instant(i18n::PROVIDER_NAME, &[("providerName", &request.provider_name)]),
        description: translator.instant(i18n::CONFIRM_DISCONNECT, &[]),
        confirm_text: translator.instant(i18n::YES_DELETE, &[]),
        cancel_text: translator.instant(i18n::NO_GO_BACK, &[]),
    }
}

/// Runs the settings page headlessly: every dispatched action is followed
/// by its effects, and their outcomes, until nothing is left to do.
pub struct DataSourceItemController<S> {
    item: DataSourceItem,
    services: S,
}

impl<S: SettingsServices> DataSourceItemController<S> {
    pub fn new(item: DataSourceItem, services: S) -> Self {
        Self { item, services }
    }

    pub fn item(&self) -> &DataSourceItem {
        &self.item
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    pub async fn run(&mut self, action: Action) -> Result<(), SettingsError> {
        let mut actions = VecDeque::from([action]);

        while let Some(action) = actions.pop_front() {
            for effect in self.item.dispatch(action)? {
                debug!("Performing {effect:?}");
                let outcome = perform(effect, &self.services).await.inspect_err(|cause| {
                    error!("Data-source settings operation failed: {cause}");
                })?;
                actions.extend(outcome);
            }
        }
        Ok(())
    }

    pub async fn initialize(&mut self, route_id: Option<String>) -> Result<(), SettingsError> {
        self.run(Action::Initialize { route_id }).await
    }

    pub async fn select_provider(&mut self, provider_id: Option<String>) -> Result<(), SettingsError> {
        self.run(Action::SelectProvider(provider_id)).await
    }

    pub async fn select_survey(&mut self, survey: Option<Survey>) -> Result<(), SettingsError> {
        self.run(Action::SelectSurvey(survey)).await
    }

    pub async fn patch_field(&mut self, name: &str, value: FieldValue) -> Result<(), SettingsError> {
        self.run(Action::PatchField { name: name.to_string(), value }).await
    }

    pub async fn save(&mut self) -> Result<(), SettingsError> {
        self.run(Action::Save).await
    }

    pub async fn toggle(&mut self, checked: bool) -> Result<(), SettingsError> {
        self.run(Action::Toggle { checked }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::AttributeQuery;
    use crate::settings::testing::{self, MockServices};

    fn controller(services: MockServices) -> DataSourceItemController<MockServices> {
        DataSourceItemController::new(DataSourceItem::default(), services)
    }

    #[tokio::test]
    async fn initialize_loads_and_resolves_attributes() {
        let mut controller = controller(MockServices::new());

        controller.initialize(Some("typeform".to_string())).await.unwrap();

        let item = controller.item();
        assert!(item.is_loaded());
        assert_eq!(item.survey_attributes().len(), 3);
        assert_eq!(item.form().get("inbound_email"), Some(&FieldValue::from("survey_title")));
        assert_eq!(item.form().get("inbound_name"), Some(&FieldValue::from("q1")));
        assert_eq!(
            *controller.services().attribute_requests.borrow(),
            vec![(12, AttributeQuery::by_priority())]
        );
    }

    #[tokio::test]
    async fn failing_source_builds_no_form() {
        let mut services = MockServices::new();
        services.failing_source = Some("surveys");
        let mut controller = controller(services);

        let result = controller.initialize(Some("typeform".to_string())).await;

        assert_eq!(result, Err(SettingsError::fetch("surveys", "503 Service Unavailable")));
        assert!(controller.item().form().is_empty());
        assert!(!controller.item().is_loaded());
    }

    #[tokio::test]
    async fn nothing_to_configure_redirects() {
        let mut services = MockServices::new();
        services.providers_data.providers.values_mut().for_each(|enabled| *enabled = true);
        let mut controller = controller(services);

        controller.initialize(None).await.unwrap();

        assert_eq!(*controller.services().navigations.borrow(), vec!["/settings/data-sources"]);
        assert!(controller.item().form().is_empty());
        assert!(controller.services().updates.borrow().is_empty());
    }

    #[tokio::test]
    async fn save_persists_then_navigates() {
        let mut controller = controller(MockServices::new());
        controller.initialize(Some("typeform".to_string())).await.unwrap();
        controller.patch_field("api_key", "rotated".into()).await.unwrap();

        controller.save().await.unwrap();

        let updates = controller.services().updates.borrow();
        assert_eq!(updates.len(), 1);
        let settings = &updates[0].settings["typeform"];
        assert_eq!(settings.options["api_key"], "rotated");
        assert_eq!(settings.inbound_fields.as_ref().unwrap()["email"], "title");
        assert_eq!(settings.inbound_fields.as_ref().unwrap()["name"], "values.q1");
        assert_eq!(*controller.services().navigations.borrow(), vec!["/settings/data-sources"]);
    }

    #[tokio::test]
    async fn choosing_another_survey_rebinds_inbound_fields() {
        let mut controller = controller(MockServices::new());
        controller.initialize(Some("typeform".to_string())).await.unwrap();
        let nps = testing::surveys().results[1].clone();

        controller.select_survey(Some(nps)).await.unwrap();
        controller.patch_field("inbound_name", "score".into()).await.unwrap();
        controller.save().await.unwrap();

        let updates = controller.services().updates.borrow();
        let settings = &updates[0].settings["typeform"];
        assert_eq!(settings.form_id, Some(15));
        let inbound = settings.inbound_fields.as_ref().unwrap();
        assert_eq!(inbound["email"], "title");
        assert_eq!(inbound["name"], "values.score");
    }

    #[tokio::test]
    async fn declined_disconnect_changes_nothing() {
        let mut services = MockServices::new();
        services.confirm_answer = false;
        let mut controller = controller(services);
        controller.initialize(Some("typeform".to_string())).await.unwrap();
        let before = controller.item().providers_data().cloned();

        controller.toggle(false).await.unwrap();

        let services = controller.services();
        assert_eq!(services.confirmations.borrow().len(), 1);
        assert!(services.updates.borrow().is_empty());
        assert!(services.navigations.borrow().is_empty());
        assert_eq!(controller.item().providers_data().cloned(), before);
        assert!(controller.item().provider().unwrap().available_provider);
    }

    #[tokio::test]
    async fn confirmed_disconnect_is_persisted() {
        let mut controller = controller(MockServices::new());
        controller.initialize(Some("typeform".to_string())).await.unwrap();

        controller.toggle(false).await.unwrap();

        let services = controller.services();
        let confirmation = &services.confirmations.borrow()[0];
        assert_eq!(confirmation.title, "Proveedor Typeform");
        assert_eq!(confirmation.confirm_text, "Sí, eliminar");
        assert_eq!(confirmation.cancel_text, "No, volver");
        assert_eq!(services.updates.borrow()[0].flag("typeform"), Some(false));
        assert_eq!(*services.navigations.borrow(), vec!["/settings/data-sources"]);
    }

    #[tokio::test]
    async fn enabling_a_new_provider_skips_confirmation() {
        let mut controller = controller(MockServices::new());
        controller.initialize(None).await.unwrap();
        controller.select_provider(Some("gravity".to_string())).await.unwrap();

        controller.toggle(true).await.unwrap();

        let services = controller.services();
        assert!(services.confirmations.borrow().is_empty());
        assert_eq!(services.updates.borrow()[0].flag("gravity"), Some(true));
        assert!(!controller.item().on_creating());
    }

    #[tokio::test]
    async fn persist_failure_is_reported_without_navigation() {
        let mut services = MockServices::new();
        services.failing_source = Some("update");
        let mut controller = controller(services);
        controller.initialize(Some("typeform".to_string())).await.unwrap();

        let result = controller.save().await;

        assert!(matches!(result, Err(SettingsError::Persist(_))));
        assert!(controller.services().navigations.borrow().is_empty());
    }
}
