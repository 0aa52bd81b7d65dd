use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::survey::{Survey, SurveyId};

/// Metadata describing one configurable field of a provider.
///
/// The form built for a provider has one control per descriptor, named by
/// `control_label` and initialised with `control_value`. `control_rules`
/// carries declarative validation (`{"required": true}`). Inbound-field
/// descriptors also carry the attribute `key` the value is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDescriptor {
    pub control_label: String,
    #[serde(default)]
    pub control_value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_rules: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ControlDescriptor {
    pub fn new(control_label: impl Into<String>, control_value: impl Into<Value>) -> Self {
        Self {
            control_label: control_label.into(),
            control_value: control_value.into(),
            control_rules: None,
            key: None,
            kind: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.control_rules
            .get_or_insert_with(Map::new)
            .insert("required".to_string(), Value::Bool(true));
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Names of the declared rules, in declaration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.control_rules
            .iter()
            .flat_map(|rules| rules.keys())
            .map(String::as_str)
    }
}

/// Provider schema as served by the data-sources service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Whether the provider binds a survey at all.
    #[serde(default)]
    pub visible_survey: bool,
    #[serde(default)]
    pub control_options: Vec<ControlDescriptor>,
    #[serde(default)]
    pub control_inbound_fields: Vec<ControlDescriptor>,
}

/// Merged per-provider view model: the schema from [`DataSourceRecord`]
/// enriched with the stored settings, the catalog flag and the bound survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceBinding {
    pub id: String,
    pub name: String,
    pub available_provider: bool,
    pub visible_survey: bool,
    pub selected_survey: Option<Survey>,
    pub form_id: Option<SurveyId>,
    pub inbound_fields: Option<BTreeMap<String, String>>,
    pub control_options: Vec<ControlDescriptor>,
    pub control_inbound_fields: Vec<ControlDescriptor>,
}
