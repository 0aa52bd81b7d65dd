use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a survey on the survey/form provider side.
pub type SurveyId = u64;

/// A survey the user can bind to a provider.
///
/// Only `id` and `title` are interpreted here; every other property sent by
/// the surveys service is kept in `extra` so the value can be written back
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Survey {
    pub fn new(id: SurveyId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            extra: Map::new(),
        }
    }
}

/// Paged envelope returned by the surveys listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyList {
    #[serde(default)]
    pub results: Vec<Survey>,
}

/// One attribute (question, built-in field) of a survey.
///
/// `kind` is the attribute `type`: `title` and `description` mark the
/// built-in attributes, anything else is a custom attribute addressed by
/// its `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyAttribute {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SurveyAttribute {
    pub fn new(key: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: kind.into(),
            extra: Map::new(),
        }
    }
}
