use std::collections::BTreeMap;

use log::debug;

use crate::model::datasource::DataSourceRecord;
use crate::model::provider::{AvailableProvider, ProvidersData};
use crate::model::survey::SurveyList;

/// Catalog entries that are not configured yet, sorted by name.
pub fn get_available_providers(providers: &BTreeMap<String, bool>) -> Vec<AvailableProvider> {
    let mut available: Vec<AvailableProvider> = providers
        .iter()
        .map(|(key, enabled)| AvailableProvider {
            id: key.to_lowercase(),
            name: key.to_lowercase(),
            kind: *enabled,
        })
        .filter(|provider| !provider.kind)
        .collect();
    available.sort_by(|a, b| a.name.cmp(&b.name));
    available
}

/// Latest value reported by one of the three page sources.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceUpdate {
    Providers(ProvidersData),
    Surveys(SurveyList),
    DataSources(Vec<DataSourceRecord>),
}

/// Snapshot of all three sources.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSources {
    pub providers: ProvidersData,
    pub surveys: SurveyList,
    pub data_sources: Vec<DataSourceRecord>,
}

/// Join point of the three page sources.
///
/// Nothing is released until every source has reported once. From then on
/// every update of any source releases a fresh snapshot built from the
/// latest value of each.
#[derive(Debug, Clone, Default)]
pub struct LoadBarrier {
    providers: Option<ProvidersData>,
    surveys: Option<SurveyList>,
    data_sources: Option<Vec<DataSourceRecord>>,
}

impl LoadBarrier {
    pub fn update(&mut self, update: SourceUpdate) -> Option<LoadedSources> {
        match update {
            SourceUpdate::Providers(providers) => self.providers = Some(providers),
            SourceUpdate::Surveys(surveys) => self.surveys = Some(surveys),
            SourceUpdate::DataSources(data_sources) => self.data_sources = Some(data_sources),
        }

        let snapshot = self.snapshot();
        if snapshot.is_none() {
            debug!("Waiting for the remaining data-source settings sources.");
        }
        snapshot
    }

    /// Replaces all three sources at once, releasing a single snapshot.
    pub fn replace(&mut self, sources: LoadedSources) -> LoadedSources {
        self.providers = Some(sources.providers.clone());
        self.surveys = Some(sources.surveys.clone());
        self.data_sources = Some(sources.data_sources.clone());
        sources
    }

    pub fn is_ready(&self) -> bool {
        self.providers.is_some() && self.surveys.is_some() && self.data_sources.is_some()
    }

    fn snapshot(&self) -> Option<LoadedSources> {
        Some(LoadedSources {
            providers: self.providers.clone()?,
            surveys: self.surveys.clone()?,
            data_sources: self.data_sources.clone()?,
        })
    }
}
