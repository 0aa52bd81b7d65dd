use serde::{Deserialize, Serialize};

use crate::requests::AttributeQuery;

/// Runtime configuration of the settings page.
///
/// Every field has a default, so a partial JSON document (or none at all)
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Prefix of every backend endpoint.
    pub api_base: String,
    /// Route of the data-sources list, also the parent of `<route>/<provider id>`.
    pub data_sources_route: String,
    pub attribute_query: AttributeQuery,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            data_sources_route: "/settings/data-sources".to_string(),
            attribute_query: AttributeQuery::by_priority(),
        }
    }
}

impl SettingsConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Extracts the provider id from a location path such as
    /// `/settings/data-sources/typeform`. The bare list route yields `None`.
    pub fn provider_id_from_path(&self, path: &str) -> Option<String> {
        let base = self.data_sources_route.trim_end_matches('/');
        path.strip_prefix(base)?
            .trim_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
    }
}
