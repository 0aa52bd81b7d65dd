use crate::model::datasource::{ControlDescriptor, DataSourceBinding, DataSourceRecord};
use crate::model::provider::{ProviderSettings, ProvidersData};
use crate::model::survey::Survey;

/// Merges the provider schemas with the stored settings, the catalog flags
/// and the survey list into one binding per provider.
pub fn combine_data_source(
    providers_data: &ProvidersData,
    records: &[DataSourceRecord],
    surveys: &[Survey],
) -> Vec<DataSourceBinding> {
    records
        .iter()
        .map(|record| combine_record(providers_data, record, surveys))
        .collect()
}

fn combine_record(
    providers_data: &ProvidersData,
    record: &DataSourceRecord,
    surveys: &[Survey],
) -> DataSourceBinding {
    let settings = providers_data.settings.get(&record.id);
    let form_id = settings.and_then(|settings| settings.form_id);
    let inbound_fields = settings.and_then(|settings| settings.inbound_fields.clone());

    let control_options = record
        .control_options
        .iter()
        .map(|descriptor| with_stored_option(descriptor, settings))
        .collect();

    let control_inbound_fields = record
        .control_inbound_fields
        .iter()
        .map(|descriptor| with_stored_inbound(descriptor, settings))
        .collect();

    DataSourceBinding {
        id: record.id.clone(),
        name: if record.name.is_empty() { record.id.clone() } else { record.name.clone() },
        available_provider: providers_data.flag(&record.id).unwrap_or(false),
        visible_survey: record.visible_survey,
        selected_survey: form_id
            .and_then(|form_id| surveys.iter().find(|survey| survey.id == form_id))
            .cloned(),
        form_id,
        inbound_fields,
        control_options,
        control_inbound_fields,
    }
}

fn with_stored_option(
    descriptor: &ControlDescriptor,
    settings: Option<&ProviderSettings>,
) -> ControlDescriptor {
    let mut descriptor = descriptor.clone();
    if let Some(stored) = settings.and_then(|settings| settings.options.get(&descriptor.control_label)) {
        descriptor.control_value = stored.clone();
    }
    descriptor
}

fn with_stored_inbound(
    descriptor: &ControlDescriptor,
    settings: Option<&ProviderSettings>,
) -> ControlDescriptor {
    let mut descriptor = descriptor.clone();
    let stored = descriptor.key.as_ref().and_then(|key| {
        settings
            .and_then(|settings| settings.inbound_fields.as_ref())
            .and_then(|inbound| inbound.get(key))
    });
    if let Some(stored) = stored {
        descriptor.control_value = stored.clone().into();
    }
    descriptor
}
