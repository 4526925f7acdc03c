use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::model::Tags;

/// Values map sources use for "no value"
const NULL_LIKE: [&str; 3] = ["", "nan", "none"];

/// Reads a tag object whose values may be strings, numbers, booleans or
/// lists (a simplified edge that merged several ways lists every value).
/// Lists resolve to their first usable element; null-like values are dropped.
pub(super) fn deserialize_tags<'de, D>(deserializer: D) -> Result<Tags, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| tag_value(value).map(|value| (key, value)))
        .collect())
}

fn tag_value(value: Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            if NULL_LIKE.contains(&text.to_lowercase().as_str()) {
                None
            } else {
                Some(text.to_string())
            }
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(values) => values.into_iter().find_map(tag_value),
        Value::Null | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Tagged {
        #[serde(default, deserialize_with = "deserialize_tags")]
        tags: Tags,
    }

    fn parse(json: &str) -> Tags {
        serde_json::from_str::<Tagged>(json).unwrap().tags
    }

    #[test]
    fn lists_take_first_value() {
        let tags = parse(r#"{"tags": {"highway": ["primary", "secondary"], "lanes": [null, "3"]}}"#);
        assert_eq!(tags.get("highway"), Some("primary"));
        assert_eq!(tags.get("lanes"), Some("3"));
    }

    #[test]
    fn null_like_values_are_dropped() {
        let tags = parse(r#"{"tags": {"name": "NaN", "ref": "", "oneway": null, "note": " None "}}"#);
        assert!(tags.is_empty());
    }

    #[test]
    fn scalars_become_strings() {
        let tags = parse(r#"{"tags": {"lanes": 2, "oneway": true}}"#);
        assert_eq!(tags.get("lanes"), Some("2"));
        assert_eq!(tags.get("oneway"), Some("true"));
    }

    #[test]
    fn missing_or_null_tags_are_empty() {
        assert!(parse("{}").is_empty());
        assert!(parse(r#"{"tags": null}"#).is_empty());
    }
}
