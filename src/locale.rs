use crate::error::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

/// A language/region identifier used as a localized value key.
///
/// Stored in canonical form: lowercase language, optional uppercase region,
/// optional variant, joined with `_` (`en`, `ru_RU`, `en_US_POSIX`).
/// Both `_` and `-` separators are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleKey(String);

impl LocaleKey {
    pub fn parse(tag: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidLocale(tag.to_string());

        let mut parts = tag.split(['_', '-']);
        let language = parts.next().filter(|l| is_language(l)).ok_or_else(invalid)?;
        let mut canonical = language.to_ascii_lowercase();

        if let Some(region) = parts.next() {
            if !is_region(region) {
                return Err(invalid());
            }
            canonical.push('_');
            canonical.push_str(&region.to_ascii_uppercase());
        }

        for variant in parts {
            if variant.is_empty() || !variant.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(invalid());
            }
            canonical.push('_');
            canonical.push_str(variant);
        }

        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn language(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }

    pub fn region(&self) -> Option<&str> {
        self.0.split('_').nth(1)
    }

    fn variant(&self) -> Option<&str> {
        let mut split = self.0.splitn(3, '_');
        split.nth(2)
    }

    /// Human-readable name, e.g. "Russian (Russia)".
    /// Unknown languages or regions fall back to their code.
    pub fn display_name(&self) -> String {
        let language = language_name(self.language()).unwrap_or(self.language());
        let mut extras: Vec<&str> = Vec::new();
        if let Some(region) = self.region() {
            extras.push(region_name(region).unwrap_or(region));
        }
        if let Some(variant) = self.variant() {
            extras.push(variant);
        }

        if extras.is_empty() {
            language.to_string()
        } else {
            format!("{language} ({})", extras.join(", "))
        }
    }
}

fn is_language(s: &str) -> bool {
    (2..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_region(s: &str) -> bool {
    (s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
        || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit()))
}

fn language_name(code: &str) -> Option<&'static str> {
    Some(match code {
        "ar" => "Arabic",
        "cs" => "Czech",
        "de" => "German",
        "el" => "Greek",
        "en" => "English",
        "es" => "Spanish",
        "fi" => "Finnish",
        "fr" => "French",
        "he" => "Hebrew",
        "hi" => "Hindi",
        "it" => "Italian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "nl" => "Dutch",
        "pl" => "Polish",
        "pt" => "Portuguese",
        "ru" => "Russian",
        "sv" => "Swedish",
        "tr" => "Turkish",
        "uk" => "Ukrainian",
        "zh" => "Chinese",
        _ => return None,
    })
}

fn region_name(code: &str) -> Option<&'static str> {
    Some(match code {
        "AT" => "Austria",
        "AU" => "Australia",
        "BE" => "Belgium",
        "BR" => "Brazil",
        "CA" => "Canada",
        "CH" => "Switzerland",
        "CN" => "China",
        "DE" => "Germany",
        "ES" => "Spain",
        "FR" => "France",
        "GB" => "United Kingdom",
        "IN" => "India",
        "IT" => "Italy",
        "JP" => "Japan",
        "KR" => "South Korea",
        "MX" => "Mexico",
        "NL" => "Netherlands",
        "PT" => "Portugal",
        "RU" => "Russia",
        "TW" => "Taiwan",
        "UA" => "Ukraine",
        "US" => "United States",
        _ => return None,
    })
}

impl FromStr for LocaleKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for LocaleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LocaleKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        LocaleKey::parse(&tag).map_err(de::Error::custom)
    }
}

/// The ordered set of locales a host application edits, with display names.
/// Duplicate locales keep their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailableLocales {
    entries: Vec<(LocaleKey, String)>,
}

impl AvailableLocales {
    pub fn new(entries: impl IntoIterator<Item = (LocaleKey, String)>) -> Self {
        let mut out = Self::default();
        for (locale, name) in entries {
            if !out.contains(&locale) {
                out.entries.push((locale, name));
            }
        }
        out
    }

    /// Uses [`LocaleKey::display_name`] for every locale.
    pub fn from_keys(keys: impl IntoIterator<Item = LocaleKey>) -> Self {
        Self::new(keys.into_iter().map(|k| {
            let name = k.display_name();
            (k, name)
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LocaleKey, &str)> {
        self.entries.iter().map(|(k, n)| (k, n.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &LocaleKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn display_name(&self, locale: &LocaleKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == locale)
            .map(|(_, n)| n.as_str())
    }

    pub fn contains(&self, locale: &LocaleKey) -> bool {
        self.entries.iter().any(|(k, _)| k == locale)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
