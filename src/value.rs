use crate::error::{ParseError, SerializationError};
use crate::locale::LocaleKey;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};
use std::fmt;

/// A text value with one variant per locale.
///
/// A locale without an entry reads as the empty string. Values are immutable:
/// editing produces a new instance. Equality compares the mappings and ignores
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalizedValue {
    values: IndexMap<LocaleKey, String>,
}

impl LocalizedValue {
    pub fn new(values: IndexMap<LocaleKey, String>) -> Self {
        Self { values }
    }

    /// A value holding text for a single locale.
    pub fn single(locale: LocaleKey, text: impl Into<String>) -> Self {
        let mut values = IndexMap::with_capacity(1);
        values.insert(locale, text.into());
        Self { values }
    }

    pub fn get(&self, locale: &LocaleKey) -> &str {
        self.values.get(locale).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, locale: &LocaleKey) -> bool {
        self.values.contains_key(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &LocaleKey> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LocaleKey, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encodes the mapping as a JSON object keyed by canonical locale tags.
    pub fn to_serialized(&self) -> Result<String, SerializationError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON object of locale tag to string pairs.
    pub fn from_serialized(json: &str) -> Result<Self, ParseError> {
        let raw: IndexMap<String, String> = serde_json::from_str(json)?;
        let mut values = IndexMap::with_capacity(raw.len());
        for (tag, text) in raw {
            values.insert(LocaleKey::parse(&tag)?, text);
        }
        Ok(Self { values })
    }
}

impl FromIterator<(LocaleKey, String)> for LocalizedValue {
    fn from_iter<I: IntoIterator<Item = (LocaleKey, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for LocalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_serialized().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Serialize for LocalizedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (locale, text) in &self.values {
            map.serialize_entry(locale.as_str(), text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LocalizedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> de::Visitor<'de> for ValueVisitor {
            type Value = LocalizedValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of locale tag to string pairs")
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = IndexMap::new();
                while let Some((tag, text)) = map.next_entry::<String, String>()? {
                    let locale = LocaleKey::parse(&tag).map_err(de::Error::custom)?;
                    values.insert(locale, text);
                }
                Ok(LocalizedValue { values })
            }
        }

        deserializer.deserialize_map(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::LocalizedValue;
    use crate::error::ParseError;
    use crate::locale::LocaleKey;

    fn loc(tag: &str) -> LocaleKey {
        LocaleKey::parse(tag).unwrap()
    }

    #[test]
    fn missing_locale_reads_as_empty() {
        let v = LocalizedValue::single(loc("en"), "Hello");
        assert_eq!(v.get(&loc("en")), "Hello");
        assert_eq!(v.get(&loc("ru_RU")), "");
        assert_eq!(LocalizedValue::default().get(&loc("en")), "");
    }

    #[test]
    fn serialized_form_uses_canonical_tags() {
        let v: LocalizedValue = [(loc("en"), "en".to_string()), (loc("ru-ru"), "ru".to_string())]
            .into_iter()
            .collect();
        assert_eq!(v.to_serialized().unwrap(), r#"{"en":"en","ru_RU":"ru"}"#);
        assert_eq!(v.to_string(), r#"{"en":"en","ru_RU":"ru"}"#);
    }

    #[test]
    fn from_serialized_resolves_keys() {
        let v = LocalizedValue::from_serialized(r#"{"EN":"a","ru-RU":"б"}"#).unwrap();
        assert_eq!(v.get(&loc("en")), "a");
        assert_eq!(v.get(&loc("ru_RU")), "б");
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn from_serialized_rejects_non_objects_and_non_strings() {
        for json in ["[]", "\"en\"", "{\"en\": 1}", "{\"en\": null}", "{\"en\": \"a\"", ""] {
            assert!(
                matches!(LocalizedValue::from_serialized(json), Err(ParseError::Json(_))),
                "{json:?} should fail"
            );
        }
    }

    #[test]
    fn from_serialized_rejects_unresolvable_locale() {
        let err = LocalizedValue::from_serialized(r#"{"not a locale":"x"}"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidLocale(ref tag) if tag == "not a locale"));
    }

    #[test]
    fn serde_deserialize_reports_bad_locale() {
        let res: Result<LocalizedValue, _> = serde_json::from_str(r#"{"??":"x"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn equality_ignores_order() {
        let a: LocalizedValue = [(loc("en"), "A".to_string()), (loc("ru"), "B".to_string())]
            .into_iter()
            .collect();
        let b: LocalizedValue = [(loc("ru"), "B".to_string()), (loc("en"), "A".to_string())]
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_ne!(a, LocalizedValue::single(loc("en"), "A"));
    }

    #[test]
    fn empty_text_is_kept_as_an_entry() {
        let v = LocalizedValue::single(loc("en"), "");
        assert!(v.contains(&loc("en")));
        assert_ne!(v, LocalizedValue::default());
    }
}
