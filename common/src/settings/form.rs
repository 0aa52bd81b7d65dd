//! Dynamically keyed form model.
//!
//! A [`FormGroup`] is an ordered set of named [`FormControl`]s. Controls are
//! added and removed at runtime from server metadata, so values are a tagged
//! [`FieldValue`] rather than a fixed struct.

use serde_json::{Map, Value};

use crate::model::survey::Survey;

/// Current value of a form control.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    Bool(bool),
    Number(serde_json::Number),
    Survey(Survey),
}

impl FieldValue {
    /// Maps a raw JSON value (a descriptor's `control_value`) onto a field value.
    /// Objects carrying a survey `id` become [`FieldValue::Survey`]; other
    /// composite values are kept as their JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Empty,
            Value::Bool(flag) => FieldValue::Bool(*flag),
            Value::Number(number) => FieldValue::Number(number.clone()),
            Value::String(text) => FieldValue::Text(text.clone()),
            Value::Object(_) => match serde_json::from_value::<Survey>(value.clone()) {
                Ok(survey) => FieldValue::Survey(survey),
                Err(_) => FieldValue::Text(value.to_string()),
            },
            Value::Array(_) => FieldValue::Text(value.to_string()),
        }
    }

    /// Reads text typed into an input back into the kind of `template`.
    /// Numeric fields stay numeric; a cleared numeric field becomes empty.
    pub fn from_input(raw: String, template: &Value) -> Self {
        if !template.is_number() {
            return FieldValue::Text(raw);
        }
        if raw.trim().is_empty() {
            return FieldValue::Empty;
        }
        match raw.trim().parse::<serde_json::Number>() {
            Ok(number) => FieldValue::Number(number),
            Err(_) => FieldValue::Text(raw),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Empty => Value::Null,
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Bool(flag) => Value::Bool(*flag),
            FieldValue::Number(number) => Value::Number(number.clone()),
            FieldValue::Survey(survey) => {
                serde_json::to_value(survey).unwrap_or(Value::Null)
            }
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_survey(&self) -> Option<&Survey> {
        match self {
            FieldValue::Survey(survey) => Some(survey),
            _ => None,
        }
    }

    /// True for values a `required` validator rejects.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// True when the value counts as "set" (non-empty, non-false, non-zero).
    pub fn is_set(&self) -> bool {
        match self {
            FieldValue::Empty => false,
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Bool(flag) => *flag,
            FieldValue::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            FieldValue::Survey(_) => true,
        }
    }

    /// Text shown in an input element.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Text(text) => text.clone(),
            FieldValue::Bool(flag) => flag.to_string(),
            FieldValue::Number(number) => number.to_string(),
            FieldValue::Survey(survey) => survey.title.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(text: Option<String>) -> Self {
        text.map_or(FieldValue::Empty, FieldValue::Text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Required,
}

impl Validator {
    /// Validator for a `control_rules` key. Unknown rules yield `None`.
    pub fn from_rule(rule: &str) -> Option<Self> {
        match rule {
            "required" => Some(Validator::Required),
            _ => None,
        }
    }

    pub fn accepts(&self, value: &FieldValue) -> bool {
        match self {
            Validator::Required => !value.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormControl {
    pub name: String,
    pub value: FieldValue,
    pub validators: Vec<Validator>,
}

impl FormControl {
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
            validators: Vec::new(),
        }
    }

    pub fn with_validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn is_required(&self) -> bool {
        self.validators.contains(&Validator::Required)
    }

    /// Validators the current value fails.
    pub fn errors(&self) -> Vec<Validator> {
        self.validators
            .iter()
            .copied()
            .filter(|validator| !validator.accepts(&self.value))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormGroup {
    controls: Vec<FormControl>,
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a control. An existing control with the same name is kept
    /// and `false` is returned.
    pub fn add_control(&mut self, control: FormControl) -> bool {
        if self.contains(&control.name) {
            return false;
        }
        self.controls.push(control);
        true
    }

    pub fn remove_control(&mut self, name: &str) -> Option<FormControl> {
        let index = self.controls.iter().position(|control| control.name == name)?;
        Some(self.controls.remove(index))
    }

    /// Removes every registered control.
    pub fn remove_all(&mut self) {
        let names: Vec<String> = self.names().map(str::to_string).collect();
        for name in names {
            self.remove_control(&name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.control(name).is_some()
    }

    pub fn control(&self, name: &str) -> Option<&FormControl> {
        self.controls.iter().find(|control| control.name == name)
    }

    pub fn controls(&self) -> impl Iterator<Item = &FormControl> {
        self.controls.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|control| control.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.control(name).map(|control| &control.value)
    }

    /// Writes the given values into the matching controls. Names without a
    /// registered control are ignored.
    pub fn patch_value<N, I>(&mut self, values: I)
    where
        N: AsRef<str>,
        I: IntoIterator<Item = (N, FieldValue)>,
    {
        for (name, value) in values {
            if let Some(control) = self
                .controls
                .iter_mut()
                .find(|control| control.name == name.as_ref())
            {
                control.value = value;
            }
        }
    }

    /// JSON snapshot of every control value.
    pub fn value(&self) -> Map<String, Value> {
        self.controls
            .iter()
            .map(|control| (control.name.clone(), control.value.to_json()))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(FormControl::is_valid)
    }

    pub fn invalid_controls(&self) -> Vec<&str> {
        self.controls
            .iter()
            .filter(|control| !control.is_valid())
            .map(|control| control.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adding_an_existing_name_keeps_the_first_control() {
        let mut form = FormGroup::new();

        assert!(form.add_control(FormControl::new("id", "typeform".into())));
        assert!(!form.add_control(FormControl::new("id", "gravity".into())));

        assert_eq!(form.len(), 1);
        assert_eq!(form.get("id"), Some(&FieldValue::from("typeform")));
    }

    #[test]
    fn patch_ignores_unknown_names() {
        let mut form = FormGroup::new();
        form.add_control(FormControl::new("api_key", FieldValue::Empty));

        form.patch_value([("api_key", "secret".into()), ("missing", "x".into())]);

        assert_eq!(form.get("api_key"), Some(&FieldValue::from("secret")));
        assert!(!form.contains("missing"));
    }

    #[test]
    fn required_rejects_empty_text_but_accepts_false() {
        let mut form = FormGroup::new();
        form.add_control(
            FormControl::new("api_key", FieldValue::Text(String::new()))
                .with_validators([Validator::Required]),
        );
        form.add_control(
            FormControl::new("sandbox", FieldValue::Bool(false)).with_validators([Validator::Required]),
        );

        assert!(!form.is_valid());
        assert_eq!(form.invalid_controls(), vec!["api_key"]);

        form.patch_value([("api_key", FieldValue::from("secret"))]);
        assert!(form.is_valid());
    }

    #[test]
    fn unknown_rules_have_no_validator() {
        assert_eq!(Validator::from_rule("required"), Some(Validator::Required));
        assert_eq!(Validator::from_rule("maxlength"), None);
    }

    #[test]
    fn remove_all_empties_the_group() {
        let mut form = FormGroup::new();
        form.add_control(FormControl::new("a", FieldValue::Empty));
        form.add_control(FormControl::new("b", FieldValue::Empty));

        form.remove_all();

        assert!(form.is_empty());
    }

    #[test]
    fn json_values_map_onto_tagged_values() {
        assert_eq!(FieldValue::from_json(&Value::Null), FieldValue::Empty);
        assert_eq!(FieldValue::from_json(&json!(true)), FieldValue::Bool(true));
        assert_eq!(FieldValue::from_json(&json!("x")), FieldValue::from("x"));
        assert_eq!(
            FieldValue::from_json(&json!({ "id": 4, "title": "NPS" })),
            FieldValue::Survey(Survey::new(4, "NPS"))
        );
        assert_eq!(
            FieldValue::from_json(&json!({ "region": "eu" })),
            FieldValue::Text(r#"{"region":"eu"}"#.to_string())
        );
    }

    #[test]
    fn form_value_is_a_json_snapshot() {
        let mut form = FormGroup::new();
        form.add_control(FormControl::new("id", "typeform".into()));
        form.add_control(FormControl::new("form_id", FieldValue::Empty));

        let value = form.value();

        assert_eq!(value["id"], json!("typeform"));
        assert_eq!(value["form_id"], Value::Null);
    }

    #[test]
    fn input_on_a_numeric_field_stays_numeric() {
        let port = json!(443);

        assert_eq!(FieldValue::from_input("8443".into(), &port).to_json(), json!(8443));
        assert_eq!(FieldValue::from_input(" ".into(), &port), FieldValue::Empty);
        assert_eq!(FieldValue::from_input("eu".into(), &json!("us")), FieldValue::from("eu"));
    }
}
