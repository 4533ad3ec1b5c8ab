//! Cached profile values used to auto-fill enrollment forms.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::EnrollError;

/// The `name` attribute of a profile entry: one field name or a list of aliases.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldNames {
    One(String),
    Many(Vec<String>),
}

impl FieldNames {
    /// Normalise to the alias list. A scalar name becomes a singleton.
    #[must_use]
    pub fn into_aliases(self) -> Vec<String> {
        match self {
            FieldNames::One(name) => vec![name],
            FieldNames::Many(names) => names,
        }
    }
}

/// One decoded `extra_info` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileField {
    pub name: FieldNames,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    extra_info: Vec<ProfileField>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    data: ProfileData,
}

/// Read-only field-name → value lookup built once per submitter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileCache {
    values: HashMap<String, String>,
}

impl ProfileCache {
    /// Build the cache from a decoded profile-info response.
    ///
    /// Every alias of an entry maps to the entry's value; when two entries
    /// share a name the later one wins.
    pub fn load(response: &Value) -> Result<Self, EnrollError> {
        let decoded = ProfileResponse::deserialize(response)
            .map_err(|e| EnrollError::MalformedProfile(e.to_string()))?;

        Ok(Self::from_fields(decoded.data.extra_info))
    }

    /// Build the cache from already-decoded entries.
    #[must_use]
    pub fn from_fields(fields: impl IntoIterator<Item = ProfileField>) -> Self {
        let mut values = HashMap::new();
        for field in fields {
            let value = stringify(field.value);
            for alias in field.name.into_aliases() {
                values.insert(alias, value.clone());
            }
        }
        Self { values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field names in sorted order, for operator display.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProfileCache {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_and_alias_names_are_both_indexed() {
        let response = json!({
            "data": {
                "extra_info": [
                    { "name": "姓名", "value": "Li" },
                    { "name": ["phone", "手机", "mobile"], "value": "13800000000" },
                ]
            }
        });

        let cache = ProfileCache::load(&response).unwrap();

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.get("姓名"), Some("Li"));
        assert_eq!(cache.get("phone"), Some("13800000000"));
        assert_eq!(cache.get("mobile"), Some("13800000000"));
        assert_eq!(cache.get("Phone"), None);
    }

    #[test]
    fn later_entries_overwrite_earlier_ones() {
        let response = json!({
            "data": {
                "extra_info": [
                    { "name": "school", "value": "old" },
                    { "name": ["school", "college"], "value": "new" },
                ]
            }
        });

        let cache = ProfileCache::load(&response).unwrap();
        assert_eq!(cache.get("school"), Some("new"));
        assert_eq!(cache.get("college"), Some("new"));
    }

    #[test]
    fn non_string_values_are_stringified() {
        let response = json!({
            "data": {
                "extra_info": [
                    { "name": "student_no", "value": 20240001 },
                    { "name": "note", "value": null },
                    { "name": "empty" },
                ]
            }
        });

        let cache = ProfileCache::load(&response).unwrap();
        assert_eq!(cache.get("student_no"), Some("20240001"));
        assert_eq!(cache.get("note"), Some(""));
        assert_eq!(cache.get("empty"), Some(""));
    }

    #[test]
    fn missing_extra_info_is_malformed() {
        for response in [
            json!({}),
            json!({ "data": null }),
            json!({ "data": {} }),
            json!({ "data": { "extra_info": "nope" } }),
            json!({ "sta": -1, "msg": "token expired" }),
        ] {
            let err = ProfileCache::load(&response).unwrap_err();
            assert!(
                matches!(err, EnrollError::MalformedProfile(_)),
                "unexpected error for {response}: {err}"
            );
        }
    }

    #[test]
    fn empty_extra_info_is_a_valid_empty_cache() {
        let cache = ProfileCache::load(&json!({ "data": { "extra_info": [] } })).unwrap();
        assert!(cache.is_empty());
    }
}
