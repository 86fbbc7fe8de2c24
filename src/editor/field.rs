use crate::editor::config::FieldSize;
use crate::editor::target::PropertyMeta;
use crate::editor::validator::ValidationFailure;
use crate::locale::LocaleKey;

/// Identity of a created field; stable while the field stays cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub(crate) u64);

/// Which input renders a field. Resolved once, when the field is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    SingleLine,
    MultiLine,
    /// Built by a custom field provider; the tag names the widget to render.
    Custom(String),
}

/// Passed to a custom field provider.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub locale: &'a LocaleKey,
    pub property: Option<&'a PropertyMeta>,
}

pub type FieldProvider = Box<dyn Fn(&FieldContext<'_>) -> EditField>;

/// One locale's text input inside the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditField {
    id: FieldId,
    locale: Option<LocaleKey>,
    kind: FieldKind,
    label: String,
    text: String,
    required: bool,
    required_message: Option<String>,
    size: Option<FieldSize>,
    class_names: Vec<String>,
    error: Option<ValidationFailure>,
}

impl EditField {
    fn with_kind(kind: FieldKind) -> Self {
        Self {
            id: FieldId(0),
            locale: None,
            kind,
            label: String::new(),
            text: String::new(),
            required: false,
            required_message: None,
            size: None,
            class_names: Vec::new(),
            error: None,
        }
    }

    pub fn single_line() -> Self {
        Self::with_kind(FieldKind::SingleLine)
    }

    pub fn multi_line() -> Self {
        Self::with_kind(FieldKind::MultiLine)
    }

    pub fn custom(widget: impl Into<String>) -> Self {
        Self::with_kind(FieldKind::Custom(widget.into()))
    }

    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    pub fn with_size(mut self, size: FieldSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_names.push(class_name.into());
        self
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The locale this field edits; `None` until the editor adopts the field.
    pub fn locale(&self) -> Option<&LocaleKey> {
        self.locale.as_ref()
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn required_message(&self) -> Option<&str> {
        self.required_message.as_deref()
    }

    pub fn size(&self) -> Option<&FieldSize> {
        self.size.as_ref()
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn error(&self) -> Option<&ValidationFailure> {
        self.error.as_ref()
    }

    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn adopt(&mut self, id: FieldId, locale: LocaleKey, label: &str) {
        self.id = id;
        self.locale = Some(locale);
        self.label = label.to_string();
    }

    pub(crate) fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub(crate) fn set_default_required_message(&mut self, message: String) {
        if self.required_message.as_deref().is_none_or(str::is_empty) {
            self.required_message = Some(message);
        }
    }

    pub(crate) fn add_class_name(&mut self, class_name: &str) {
        if !self.class_names.iter().any(|c| c == class_name) {
            self.class_names.push(class_name.to_string());
        }
    }

    /// Replaces the text without counting as a user edit.
    pub(crate) fn seed(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.error = None;
    }

    /// Returns whether the text actually changed.
    pub(crate) fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        true
    }

    pub(crate) fn set_error(&mut self, error: Option<ValidationFailure>) {
        self.error = error;
    }

    pub(crate) fn required_failure(&self) -> Option<ValidationFailure> {
        if !self.required || !self.text.is_empty() {
            return None;
        }
        let message = self
            .required_message
            .clone()
            .unwrap_or_else(|| format!("{} is required", self.label));
        Some(ValidationFailure::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::{EditField, FieldId, FieldKind};
    use crate::locale::LocaleKey;

    #[test]
    fn set_text_reports_actual_changes_only() {
        let mut field = EditField::single_line();
        assert!(field.set_text("a"));
        assert!(!field.set_text("a"));
        assert_eq!(field.text(), "a");
    }

    #[test]
    fn default_required_message_keeps_provider_message() {
        let mut field = EditField::custom("rich-text").with_required_message("Fill me");
        field.set_default_required_message("Field \"name\" is required".to_string());
        assert_eq!(field.required_message(), Some("Fill me"));
        assert_eq!(field.kind(), &FieldKind::Custom("rich-text".to_string()));

        let mut field = EditField::single_line();
        field.set_default_required_message("Field \"name\" is required".to_string());
        assert_eq!(field.required_message(), Some("Field \"name\" is required"));
    }

    #[test]
    fn required_empty_field_fails() {
        let mut field = EditField::single_line();
        field.adopt(FieldId(1), LocaleKey::parse("en").unwrap(), "English");
        assert!(field.required_failure().is_none());

        field.set_required(true);
        assert_eq!(
            field.required_failure().unwrap().message(),
            "English is required"
        );
        field.set_text("x");
        assert!(field.required_failure().is_none());
    }
}
