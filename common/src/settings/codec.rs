//! Inbound-field codec.
//!
//! Inbound fields are stored as placeholders: `title` and `content` for the
//! built-in survey attributes, `values.<key>` for custom attributes. The form
//! shows attribute keys instead, so values are decoded when a survey's
//! attributes arrive and encoded again on save.
//!
//! Decoding looks attributes up by `type`, encoding by `key`.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::survey::SurveyAttribute;

pub const TITLE_TYPE: &str = "title";
pub const DESCRIPTION_TYPE: &str = "description";

pub const TITLE_PLACEHOLDER: &str = "title";
pub const CONTENT_PLACEHOLDER: &str = "content";
pub const VALUES_PREFIX: &str = "values.";

static VALUES_PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)values\.").expect("static pattern is valid"));

/// Stored placeholder to the attribute key shown in the form.
pub fn decode(raw: Option<&str>, attributes: &[SurveyAttribute]) -> Option<String> {
    match raw {
        Some(TITLE_PLACEHOLDER) => find_by_type(attributes, TITLE_TYPE).map(|a| a.key.clone()),
        Some(CONTENT_PLACEHOLDER) => {
            find_by_type(attributes, DESCRIPTION_TYPE).map(|a| a.key.clone())
        }
        Some(raw) if !raw.is_empty() => Some(VALUES_PREFIX_PATTERN.replace_all(raw, "").into_owned()),
        _ => None,
    }
}

/// Attribute chosen in the form to its stored placeholder.
pub fn encode(attribute: Option<&SurveyAttribute>) -> String {
    match attribute {
        None => String::new(),
        Some(attribute) if attribute.kind == TITLE_TYPE => TITLE_PLACEHOLDER.to_string(),
        Some(attribute) if attribute.kind == DESCRIPTION_TYPE => CONTENT_PLACEHOLDER.to_string(),
        Some(attribute) => format!("{VALUES_PREFIX}{}", attribute.key),
    }
}

pub fn find_by_type<'a>(attributes: &'a [SurveyAttribute], kind: &str) -> Option<&'a SurveyAttribute> {
    attributes.iter().find(|attribute| attribute.kind == kind)
}

pub fn find_by_key<'a>(attributes: &'a [SurveyAttribute], key: &str) -> Option<&'a SurveyAttribute> {
    attributes.iter().find(|attribute| attribute.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn attributes() -> Vec<SurveyAttribute> {
        vec![
            SurveyAttribute::new("survey_title", "title"),
            SurveyAttribute::new("survey_intro", "description"),
            SurveyAttribute::new("q1", "text"),
        ]
    }

    #[test]
    fn decode_built_in_placeholders_by_type() {
        let attributes = attributes();

        assert_eq!(decode(Some("title"), &attributes).as_deref(), Some("survey_title"));
        assert_eq!(decode(Some("content"), &attributes).as_deref(), Some("survey_intro"));
    }

    #[test]
    fn decode_built_in_placeholder_without_matching_attribute() {
        assert_eq!(decode(Some("title"), &[]), None);
    }

    #[test]
    fn decode_strips_values_prefix_case_insensitively() {
        assert_eq!(decode(Some("values.foo"), &[]).as_deref(), Some("foo"));
        assert_eq!(decode(Some("VALUES.foo"), &[]).as_deref(), Some("foo"));
        assert_eq!(decode(Some("values.values.foo"), &[]).as_deref(), Some("foo"));
        assert_eq!(decode(Some("valuesXfoo"), &[]).as_deref(), Some("valuesXfoo"));
        assert_eq!(decode(Some("plain"), &[]).as_deref(), Some("plain"));
    }

    #[test]
    fn decode_absent_or_empty() {
        assert_eq!(decode(None, &attributes()), None);
        assert_eq!(decode(Some(""), &attributes()), None);
    }

    #[test]
    fn encode_cases() {
        let attributes = attributes();

        assert_eq!(encode(find_by_key(&attributes, "survey_title")), "title");
        assert_eq!(encode(find_by_key(&attributes, "survey_intro")), "content");
        assert_eq!(encode(Some(&SurveyAttribute::new("foo", "other"))), "values.foo");
        assert_eq!(encode(None), "");
    }

    #[test]
    fn lookups_use_different_fields() {
        let attributes = attributes();

        assert!(find_by_key(&attributes, "title").is_none());
        assert_eq!(find_by_type(&attributes, "title").map(|a| a.key.as_str()), Some("survey_title"));
    }

    proptest! {
        #[test]
        fn decode_recovers_the_encoded_key(key in "[a-z][a-z0-9_]{0,12}", kind in "title|description|text|number") {
            let attribute = SurveyAttribute::new(key.clone(), kind);
            let attributes = vec![attribute.clone()];

            let encoded = encode(Some(&attribute));

            prop_assert_eq!(decode(Some(&encoded), &attributes), Some(key));
        }
    }
}
