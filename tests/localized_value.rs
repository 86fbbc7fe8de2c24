use locstr::{FixedLocale, LocaleKey, LocalizedValue, LocalizedValueDatatype, ParseError};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn loc(tag: &str) -> LocaleKey {
    LocaleKey::parse(tag).expect("valid locale")
}

#[test]
fn serialized_form_round_trips_awkward_text() -> Result<()> {
    let original: LocalizedValue = [
        (loc("en"), "Quotes \" and \\ backslashes".to_string()),
        (loc("ru_RU"), "Многострочный\nтекст\tс табуляцией".to_string()),
        (loc("ja"), "絵文字 😀 and \u{0001} control".to_string()),
        (loc("de"), String::new()),
    ]
    .into_iter()
    .collect();

    let json = original.to_serialized()?;
    let restored = LocalizedValue::from_serialized(&json)?;
    assert_eq!(restored, original);
    assert_eq!(restored.get(&loc("de")), "");
    Ok(())
}

#[test]
fn empty_value_round_trips_as_empty_object() -> Result<()> {
    let json = LocalizedValue::default().to_serialized()?;
    assert_eq!(json, "{}");
    assert_eq!(LocalizedValue::from_serialized(&json)?, LocalizedValue::default());
    Ok(())
}

#[test]
fn stored_java_style_and_bcp47_keys_resolve_to_the_same_locale() -> Result<()> {
    let a = LocalizedValue::from_serialized(r#"{"en_US":"color","ru_RU":"цвет"}"#)?;
    let b = LocalizedValue::from_serialized(r#"{"ru-RU":"цвет","en-US":"color"}"#)?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn parse_errors_distinguish_json_from_locale_problems() {
    assert!(matches!(
        LocalizedValue::from_serialized(r#"{"en": ["x"]}"#),
        Err(ParseError::Json(_))
    ));
    assert!(matches!(
        LocalizedValue::from_serialized(r#"{"e n": "x"}"#),
        Err(ParseError::InvalidLocale(_))
    ));
}

#[test]
fn embedded_in_a_larger_document_via_serde() -> Result<()> {
    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct Entity {
        name: LocalizedValue,
        description: Option<LocalizedValue>,
    }

    let entity = Entity {
        name: LocalizedValue::single(loc("en"), "Chair"),
        description: None,
    };
    let json = serde_json::to_string(&entity)?;
    assert_eq!(json, r#"{"name":{"en":"Chair"},"description":null}"#);
    assert_eq!(serde_json::from_str::<Entity>(&json)?, entity);
    Ok(())
}

#[test]
fn datatype_formats_in_the_injected_locale() {
    let dt = LocalizedValueDatatype::new(FixedLocale(loc("en")));
    let v = LocalizedValue::from_serialized(r#"{"en":"Chair","ru":"Стул"}"#).expect("parse");
    assert_eq!(dt.format(Some(&v)), "Chair");
    assert_eq!(dt.format_with_locale(Some(&v), &loc("fr")), "");
    assert_eq!(dt.parse(Some("Table")), Some(LocalizedValue::single(loc("en"), "Table")));
}
