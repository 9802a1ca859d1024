//! Loading class groupings from JSON and YAML documents.
//!
//! JSON goes through `serde` (see the `Deserialize` impl for [`OptionValue`]);
//! YAML is converted from `yaml-rust2` values. Both map shapes that are not
//! class values (numbers, nulls, mixed lists) to
//! [`OptionValue::Unsupported`] instead of rejecting the document, so a single
//! stray value cannot break a whole grouping.

use crate::types::{ClassGroupError, OptionValue, Options, UnsupportedKind};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use yaml_rust2::{Yaml, YamlLoader};

/// Parse a JSON object into [`Options`].
pub fn options_from_json_str(source: &str) -> Result<Options, ClassGroupError> {
    let value: OptionValue =
        serde_json::from_str(source).map_err(|e| ClassGroupError::InvalidJson {
            message: e.to_string(),
        })?;

    match value {
        OptionValue::Nested(map) => Ok(map),
        other => Err(ClassGroupError::NotAMapping {
            found: other.kind_name(),
        }),
    }
}

/// Parse the first YAML document of `source` into [`Options`].
///
/// An empty source yields an empty grouping. Mapping entries whose keys are
/// not strings are skipped.
pub fn options_from_yaml_str(source: &str) -> Result<Options, ClassGroupError> {
    let docs = YamlLoader::load_from_str(source).map_err(|e| ClassGroupError::InvalidYaml {
        message: e.to_string(),
    })?;

    let Some(doc) = docs.first() else {
        return Ok(Options::new());
    };

    match option_value_from_yaml(doc) {
        OptionValue::Nested(map) => Ok(map),
        OptionValue::Unsupported(UnsupportedKind::Null) => Ok(Options::new()),
        other => Err(ClassGroupError::NotAMapping {
            found: other.kind_name(),
        }),
    }
}

/// Convert a `yaml-rust2` value into an [`OptionValue`].
pub fn option_value_from_yaml(yaml: &Yaml) -> OptionValue {
    match yaml {
        Yaml::String(s) => OptionValue::Str(s.clone()),
        Yaml::Boolean(b) => OptionValue::Bool(*b),
        Yaml::Integer(_) | Yaml::Real(_) => OptionValue::Unsupported(UnsupportedKind::Number),
        Yaml::Null => OptionValue::Unsupported(UnsupportedKind::Null),
        Yaml::Array(items) => {
            let strings: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect();
            match strings {
                Some(strings) => OptionValue::List(strings),
                None => OptionValue::Unsupported(UnsupportedKind::MixedList),
            }
        }
        Yaml::Hash(hash) => {
            let map: Options = hash
                .iter()
                .filter_map(|(key, value)| {
                    key.as_str()
                        .map(|key| (key.to_string(), option_value_from_yaml(value)))
                })
                .collect();
            OptionValue::Nested(map)
        }
        Yaml::Alias(_) | Yaml::BadValue => OptionValue::Unsupported(UnsupportedKind::Other),
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OptionValueVisitor)
    }
}

struct OptionValueVisitor;

impl<'de> Visitor<'de> for OptionValueVisitor {
    type Value = OptionValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a boolean, string, list of strings, or mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<OptionValue, E> {
        Ok(OptionValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<OptionValue, E> {
        Ok(OptionValue::Unsupported(UnsupportedKind::Number))
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<OptionValue, E> {
        Ok(OptionValue::Unsupported(UnsupportedKind::Number))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<OptionValue, E> {
        Ok(OptionValue::Unsupported(UnsupportedKind::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<OptionValue, E> {
        Ok(OptionValue::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<OptionValue, E> {
        Ok(OptionValue::Str(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<OptionValue, E> {
        Ok(OptionValue::Unsupported(UnsupportedKind::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<OptionValue, E> {
        Ok(OptionValue::Unsupported(UnsupportedKind::Null))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<OptionValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut strings = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        let mut mixed = false;
        // Drain the whole sequence so the deserializer stays in sync.
        while let Some(item) = seq.next_element::<OptionValue>()? {
            match item {
                OptionValue::Str(s) => strings.push(s),
                _ => mixed = true,
            }
        }

        if mixed {
            Ok(OptionValue::Unsupported(UnsupportedKind::MixedList))
        } else {
            Ok(OptionValue::List(strings))
        }
    }

    fn visit_map<A>(self, mut access: A) -> Result<OptionValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Options::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, OptionValue>()? {
            map.insert(key, value);
        }
        Ok(OptionValue::Nested(map))
    }
}

impl Serialize for OptionValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OptionValue::Bool(b) => serializer.serialize_bool(*b),
            OptionValue::Str(s) => serializer.serialize_str(s),
            OptionValue::List(items) => items.serialize(serializer),
            OptionValue::Nested(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            OptionValue::Unsupported(_) => serializer.serialize_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shapes() {
        let options = options_from_json_str(
            r#"{
                "string": "a b",
                "list": ["a", "b"],
                "toggle": true,
                "number": 69,
                "float": 1.5,
                "null": null,
                "mixed": ["a", {"front": "b"}],
                "nested": {"x": "a"}
            }"#,
        )
        .unwrap();

        assert_eq!(options["string"], OptionValue::from("a b"));
        assert_eq!(options["list"], OptionValue::from(vec!["a", "b"]));
        assert_eq!(options["toggle"], OptionValue::Bool(true));
        assert_eq!(options["number"], OptionValue::Unsupported(UnsupportedKind::Number));
        assert_eq!(options["float"], OptionValue::Unsupported(UnsupportedKind::Number));
        assert_eq!(options["null"], OptionValue::Unsupported(UnsupportedKind::Null));
        assert_eq!(options["mixed"], OptionValue::Unsupported(UnsupportedKind::MixedList));
        assert!(options["nested"].is_nested());
    }

    #[test]
    fn test_json_preserves_key_order() {
        let options = options_from_json_str(r#"{"b": "1", "a": "2", "c": "3"}"#).unwrap();
        let keys: Vec<&str> = options.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_json_root_must_be_mapping() {
        let err = options_from_json_str(r#"["a", "b"]"#).unwrap_err();
        assert_eq!(err, ClassGroupError::NotAMapping { found: "list" });
    }

    #[test]
    fn test_json_syntax_error() {
        let err = options_from_json_str("{").unwrap_err();
        assert!(matches!(err, ClassGroupError::InvalidJson { .. }));
    }

    #[test]
    fn test_yaml_shapes() {
        let options = options_from_yaml_str(
            "string: a b\n\
             list: [a, b]\n\
             toggle: false\n\
             number: 69\n\
             empty:\n\
             mixed: [a, 1]\n\
             nested:\n  x: a\n  y: [b, c]\n",
        )
        .unwrap();

        assert_eq!(options["string"], OptionValue::from("a b"));
        assert_eq!(options["list"], OptionValue::from(vec!["a", "b"]));
        assert_eq!(options["toggle"], OptionValue::Bool(false));
        assert_eq!(options["number"], OptionValue::Unsupported(UnsupportedKind::Number));
        assert_eq!(options["empty"], OptionValue::Unsupported(UnsupportedKind::Null));
        assert_eq!(options["mixed"], OptionValue::Unsupported(UnsupportedKind::MixedList));
        assert_eq!(
            options["nested"].as_nested().unwrap()["y"],
            OptionValue::from(vec!["b", "c"])
        );
    }

    #[test]
    fn test_yaml_empty_document() {
        assert!(options_from_yaml_str("").unwrap().is_empty());
        assert!(options_from_yaml_str("~").unwrap().is_empty());
    }

    #[test]
    fn test_yaml_skips_non_string_keys() {
        let options = options_from_yaml_str("1: a\nk: b\n").unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options["k"], OptionValue::from("b"));
    }

    #[test]
    fn test_yaml_root_must_be_mapping() {
        let err = options_from_yaml_str("just-a-class").unwrap_err();
        assert_eq!(err, ClassGroupError::NotAMapping { found: "string" });
    }

    #[test]
    fn test_serialize_unsupported_as_null() {
        let options = options_from_json_str(r#"{"k": {"x": ["a"], "y": true, "z": 3}}"#).unwrap();
        let json = serde_json::to_string(&OptionValue::Nested(options)).unwrap();
        assert_eq!(json, r#"{"k":{"x":["a"],"y":true,"z":null}}"#);
    }
}
