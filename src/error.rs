use crate::locale::LocaleKey;
use thiserror::Error;

/// Failure to read a serialized localized value (or one of its locale keys).
#[derive(Debug, Error)]
pub enum ParseError {
    /// Not well-formed JSON, or not an object of string-to-string pairs.
    #[error("invalid localized value JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A key that cannot be resolved to a locale identifier.
    #[error("invalid locale identifier {0:?}")]
    InvalidLocale(String),
}

/// Failure to encode a localized value. Plain text never triggers this.
#[derive(Debug, Error)]
#[error("cannot encode localized value: {0}")]
pub struct SerializationError(#[from] pub serde_json::Error);

#[derive(Debug, Error)]
pub enum EditorError {
    /// Programming-contract violation detected while configuring the editor.
    #[error("editor precondition failed: {0}")]
    Precondition(&'static str),
    #[error("the edit dialog is not open")]
    NotOpen,
    #[error("the edit dialog is waiting for a discard confirmation")]
    AwaitingConfirmation,
    #[error("no discard confirmation is pending")]
    NoConfirmationPending,
    #[error("locale {0} is not edited by this dialog")]
    UnknownLocale(LocaleKey),
    /// Save was requested while some fields fail validation.
    #[error("cannot save, invalid fields: {}", join_locales(.0))]
    InvalidFields(Vec<LocaleKey>),
}

fn join_locales(locales: &[LocaleKey]) -> String {
    locales
        .iter()
        .map(LocaleKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::EditorError;
    use crate::locale::LocaleKey;

    #[test]
    fn invalid_fields_message_lists_locales() {
        let err = EditorError::InvalidFields(vec![
            LocaleKey::parse("en").unwrap(),
            LocaleKey::parse("ru_RU").unwrap(),
        ]);
        assert_eq!(err.to_string(), "cannot save, invalid fields: en, ru_RU");
    }
}
