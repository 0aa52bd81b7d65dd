use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::survey::SurveyId;

/// The providers configuration document served by the config service.
///
/// On the wire it is a single JSON object:
///
/// ```json
/// {
///   "providers": { "typeform": true, "gravity": false },
///   "typeform": { "api_key": "...", "form_id": 12, "inbound_fields": { "email": "values.q1" } }
/// }
/// ```
///
/// `providers` is the catalog of enabled flags. Every other top-level key is
/// the stored settings record of the provider with that key. Shapes that do
/// not fit (a non-boolean flag, a scalar settings record) are rejected when
/// the document is deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvidersData {
    #[serde(default)]
    pub providers: BTreeMap<String, bool>,
    #[serde(flatten)]
    pub settings: BTreeMap<String, ProviderSettings>,
}

impl ProvidersData {
    /// Enabled flag of a provider, `None` when the catalog does not list it.
    pub fn flag(&self, provider_id: &str) -> Option<bool> {
        self.providers.get(provider_id).copied()
    }

    /// Writes the enabled flag and returns the previous one.
    pub fn set_flag(&mut self, provider_id: &str, enabled: bool) -> Option<bool> {
        self.providers.insert(provider_id.to_string(), enabled)
    }

    /// Puts a flag back to a value returned earlier by [`Self::set_flag`].
    pub fn restore_flag(&mut self, provider_id: &str, previous: Option<bool>) {
        match previous {
            Some(enabled) => {
                self.providers.insert(provider_id.to_string(), enabled);
            }
            None => {
                self.providers.remove(provider_id);
            }
        }
    }
}

/// Stored settings of one provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Survey bound to the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<SurveyId>,
    /// Attribute key to encoded inbound value (`title`, `content`, `values.<key>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_fields: Option<BTreeMap<String, String>>,
    /// Every other provider option, keyed by control label.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// A catalog entry that is not configured yet and can be offered when
/// creating a new data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableProvider {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: bool,
}
