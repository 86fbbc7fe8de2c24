use crate::value::LocalizedValue;

/// Metadata of the entity property a localized value is bound to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMeta {
    pub entity: String,
    /// Property path relative to `entity`, e.g. `name`.
    pub path: String,
    pub mandatory: bool,
    /// Required in UI forms even though the stored column is nullable.
    pub not_null_ui: bool,
    /// Large text column: edited with multi-line inputs by default.
    pub long_text: bool,
}

impl PropertyMeta {
    pub fn new(entity: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    pub fn with_not_null_ui(mut self, not_null_ui: bool) -> Self {
        self.not_null_ui = not_null_ui;
        self
    }

    pub fn with_long_text(mut self, long_text: bool) -> Self {
        self.long_text = long_text;
        self
    }

    pub fn is_required(&self) -> bool {
        self.mandatory || self.not_null_ui
    }

    pub fn default_required_message(&self) -> String {
        format!("Field \"{}\" is required", self.path)
    }
}

/// The host control whose value the editor edits.
pub trait EditTarget {
    fn value(&self) -> Option<&LocalizedValue>;

    /// Receives the value committed by the dialog.
    fn set_value_from_client(&mut self, value: LocalizedValue);

    fn property(&self) -> Option<&PropertyMeta> {
        None
    }
}

/// A standalone target holding its value in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueTarget {
    value: Option<LocalizedValue>,
    property: Option<PropertyMeta>,
}

impl ValueTarget {
    pub fn new(value: Option<LocalizedValue>) -> Self {
        Self {
            value,
            property: None,
        }
    }

    pub fn with_property(mut self, property: PropertyMeta) -> Self {
        self.property = Some(property);
        self
    }

    pub fn set_value(&mut self, value: Option<LocalizedValue>) {
        self.value = value;
    }

    pub fn into_value(self) -> Option<LocalizedValue> {
        self.value
    }
}

impl EditTarget for ValueTarget {
    fn value(&self) -> Option<&LocalizedValue> {
        self.value.as_ref()
    }

    fn set_value_from_client(&mut self, value: LocalizedValue) {
        self.value = Some(value);
    }

    fn property(&self) -> Option<&PropertyMeta> {
        self.property.as_ref()
    }
}
