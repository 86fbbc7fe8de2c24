//! Display formatting and plain-text parsing of localized values, plus the
//! nullable conversion used by storage collaborators.

use crate::error::{ParseError, SerializationError};
use crate::locale::LocaleKey;
use crate::value::LocalizedValue;

/// Supplies the "current" locale of the host (e.g. the signed-in user's locale).
pub trait LocaleContext {
    fn current_locale(&self) -> LocaleKey;
}

/// A context that always reports the same locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub LocaleKey);

impl LocaleContext for FixedLocale {
    fn current_locale(&self) -> LocaleKey {
        self.0.clone()
    }
}

/// Identifier the host framework registers the datatype under.
pub const DATATYPE_ID: &str = "localizedString";

#[derive(Debug, Clone)]
pub struct LocalizedValueDatatype<C> {
    context: C,
}

impl<C: LocaleContext> LocalizedValueDatatype<C> {
    pub fn new(context: C) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Formats in the context's current locale.
    pub fn format(&self, value: Option<&LocalizedValue>) -> String {
        self.format_with_locale(value, &self.context.current_locale())
    }

    /// The text for `locale`; an absent value formats as `""`.
    pub fn format_with_locale(&self, value: Option<&LocalizedValue>, locale: &LocaleKey) -> String {
        value.map(|v| v.get(locale).to_string()).unwrap_or_default()
    }

    /// Parses in the context's current locale.
    pub fn parse(&self, text: Option<&str>) -> Option<LocalizedValue> {
        self.parse_with_locale(text, &self.context.current_locale())
    }

    /// Wraps free text as a single-locale value. Absent or empty text yields
    /// `None` rather than a value with an empty entry.
    pub fn parse_with_locale(&self, text: Option<&str>, locale: &LocaleKey) -> Option<LocalizedValue> {
        text.filter(|t| !t.is_empty())
            .map(|t| LocalizedValue::single(locale.clone(), t))
    }
}

/// Converts a nullable value into its stored column text.
pub fn to_column(value: Option<&LocalizedValue>) -> Result<Option<String>, SerializationError> {
    value.map(LocalizedValue::to_serialized).transpose()
}

/// Reads nullable column text back into a value.
pub fn from_column(data: Option<&str>) -> Result<Option<LocalizedValue>, ParseError> {
    data.map(LocalizedValue::from_serialized).transpose()
}

#[cfg(test)]
mod tests {
    use super::{FixedLocale, LocalizedValueDatatype, from_column, to_column};
    use crate::locale::LocaleKey;
    use crate::value::LocalizedValue;

    fn loc(tag: &str) -> LocaleKey {
        LocaleKey::parse(tag).unwrap()
    }

    fn datatype() -> LocalizedValueDatatype<FixedLocale> {
        LocalizedValueDatatype::new(FixedLocale(loc("ru_RU")))
    }

    #[test]
    fn format_uses_context_locale() {
        let value: LocalizedValue = [
            (loc("en"), "Table".to_string()),
            (loc("ru_RU"), "Стол".to_string()),
        ]
        .into_iter()
        .collect();
        let dt = datatype();
        assert_eq!(dt.format(Some(&value)), "Стол");
        assert_eq!(dt.format_with_locale(Some(&value), &loc("en")), "Table");
        assert_eq!(dt.format_with_locale(Some(&value), &loc("de")), "");
        assert_eq!(dt.format(None), "");
    }

    #[test]
    fn parse_wraps_text_for_one_locale() {
        let dt = datatype();
        assert_eq!(
            dt.parse(Some("Стул")),
            Some(LocalizedValue::single(loc("ru_RU"), "Стул"))
        );
        assert_eq!(
            dt.parse_with_locale(Some("Chair"), &loc("en")),
            Some(LocalizedValue::single(loc("en"), "Chair"))
        );
    }

    #[test]
    fn parse_of_absent_or_empty_text_is_no_value() {
        let dt = datatype();
        assert_eq!(dt.parse(None), None);
        assert_eq!(dt.parse(Some("")), None);
    }

    #[test]
    fn column_conversion_passes_null_through() {
        assert_eq!(to_column(None).unwrap(), None);
        assert_eq!(from_column(None).unwrap(), None);

        let value = LocalizedValue::single(loc("en"), "x");
        let column = to_column(Some(&value)).unwrap();
        assert_eq!(column.as_deref(), Some(r#"{"en":"x"}"#));
        assert_eq!(from_column(column.as_deref()).unwrap(), Some(value));
        assert!(from_column(Some("not json")).is_err());
    }
}
