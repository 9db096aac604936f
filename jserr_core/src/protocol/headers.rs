/**
 * Ordered list of request headers with case-insensitive names.
 *
 * Mirrors the semantics of the Fetch `Headers` object that callers are
 * used to: `append` keeps duplicates, `set` replaces every header with the
 * same name (ignoring ASCII case).
 */
use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    entries: Vec<(String, String)>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Removes every header called `name` and appends the new value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.entries.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.entries.push((name.to_string(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderList
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (name, value) in iter {
            list.append(name, value);
        }
        list
    }
}

/**
 * Accepts either a JSON object (`{"X-Token": "abc"}`) or a list of
 * `[name, value]` pairs, the two shapes `HeadersInit` allows.
 */
impl<'de> Deserialize<'de> for HeaderList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(HeaderListVisitor)
    }
}

/// Object keys are taken in document order, not sorted.
struct HeaderListVisitor;

impl<'de> Visitor<'de> for HeaderListVisitor {
    type Value = HeaderList;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of header names to values or a list of [name, value] pairs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut headers = HeaderList::new();
        while let Some((name, value)) = map.next_entry::<String, String>()? {
            headers.append(name, value);
        }
        Ok(headers)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut headers = HeaderList::new();
        while let Some((name, value)) = seq.next_element::<(String, String)>()? {
            headers.append(name, value);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_case_insensitively() {
        let mut headers: HeaderList = [("content-type", "text/plain"), ("X-Token", "abc")]
            .into_iter()
            .collect();

        headers.set("Content-Type", "application/json");

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(headers.get("x-token"), Some("abc"));
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let mut headers = HeaderList::new();
        headers.append("Accept", "a");
        headers.append("accept", "b");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Accept"), Some("a"));
    }

    #[test]
    fn test_deserialize_from_object_and_pairs() {
        let from_map: HeaderList = serde_json::from_str(r#"{"X-Token":"abc"}"#).unwrap();
        assert_eq!(from_map.get("x-token"), Some("abc"));

        let from_pairs: HeaderList =
            serde_json::from_str(r#"[["X-Token","abc"],["X-Token","def"]]"#).unwrap();
        assert_eq!(from_pairs.len(), 2);
    }

    #[test]
    fn test_deserialize_object_keeps_document_order() {
        let headers: HeaderList = serde_json::from_str(r#"{"X-B":"1","X-A":"2","Accept":"3"}"#).unwrap();
        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["X-B", "X-A", "Accept"]);
    }

    #[test]
    fn test_deserialize_rejects_other_shapes() {
        assert!(serde_json::from_str::<HeaderList>(r#""X-Token: abc""#).is_err());
        assert!(serde_json::from_str::<HeaderList>(r#"{"X-Token": 1}"#).is_err());
    }
}
