use serde::{Deserialize, Serialize};

/// Dialog dimensions as CSS-style lengths ("30em", "480px"). `None` leaves a
/// dimension unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DialogSize {
    pub width: Option<String>,
    pub min_width: Option<String>,
    pub max_width: Option<String>,
    pub height: Option<String>,
    pub min_height: Option<String>,
    pub max_height: Option<String>,
}

impl Default for DialogSize {
    fn default() -> Self {
        Self {
            width: Some("30em".to_string()),
            min_width: None,
            max_width: None,
            height: None,
            min_height: None,
            max_height: None,
        }
    }
}

/// Height of the built-in multi-line input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldSize {
    pub height: Option<String>,
    pub min_height: Option<String>,
    pub max_height: Option<String>,
}

impl Default for FieldSize {
    fn default() -> Self {
        Self {
            height: Some("6.5em".to_string()),
            min_height: None,
            max_height: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonStyle {
    pub text: Option<String>,
    pub icon: Option<String>,
    /// Space-separated theme names.
    pub theme: Option<String>,
}

/// Options of the localized value edit dialog.
///
/// `multiline` and `multiline_field` only affect fields created after the
/// change: fields are cached across openings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Explicit single/multi-line choice; `None` infers it from the property.
    pub multiline: Option<bool>,
    pub check_for_unsaved_changes: bool,
    pub title: String,
    pub class_name: Option<String>,
    pub dialog: DialogSize,
    pub multiline_field: FieldSize,
    pub save: ButtonStyle,
    pub cancel: ButtonStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            multiline: None,
            check_for_unsaved_changes: true,
            title: "Localized value".to_string(),
            class_name: Some("localized-string-editor".to_string()),
            dialog: DialogSize::default(),
            multiline_field: FieldSize::default(),
            save: ButtonStyle {
                text: Some("Save".to_string()),
                icon: Some("check".to_string()),
                theme: Some("primary".to_string()),
            },
            cancel: ButtonStyle {
                text: Some("Cancel".to_string()),
                icon: Some("ban".to_string()),
                theme: None,
            },
        }
    }
}

impl EditorConfig {
    pub fn is_multiline(&self) -> bool {
        self.multiline == Some(true)
    }

    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = Some(multiline);
        self
    }

    pub fn with_check_for_unsaved_changes(mut self, check: bool) -> Self {
        self.check_for_unsaved_changes = check;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_class_name(mut self, class_name: Option<String>) -> Self {
        self.class_name = class_name;
        self
    }

    pub fn with_width(mut self, width: Option<String>) -> Self {
        self.dialog.width = width;
        self
    }

    pub fn with_min_width(mut self, min_width: Option<String>) -> Self {
        self.dialog.min_width = min_width;
        self
    }

    pub fn with_max_width(mut self, max_width: Option<String>) -> Self {
        self.dialog.max_width = max_width;
        self
    }

    pub fn with_height(mut self, height: Option<String>) -> Self {
        self.dialog.height = height;
        self
    }

    pub fn with_min_height(mut self, min_height: Option<String>) -> Self {
        self.dialog.min_height = min_height;
        self
    }

    pub fn with_max_height(mut self, max_height: Option<String>) -> Self {
        self.dialog.max_height = max_height;
        self
    }

    pub fn with_multiline_field_height(mut self, height: Option<String>) -> Self {
        self.multiline_field.height = height;
        self
    }

    pub fn with_multiline_field_min_height(mut self, min_height: Option<String>) -> Self {
        self.multiline_field.min_height = min_height;
        self
    }

    pub fn with_multiline_field_max_height(mut self, max_height: Option<String>) -> Self {
        self.multiline_field.max_height = max_height;
        self
    }

    pub fn with_save_button(mut self, style: ButtonStyle) -> Self {
        self.save = style;
        self
    }

    pub fn with_cancel_button(mut self, style: ButtonStyle) -> Self {
        self.cancel = style;
        self
    }
}

/// Converts a CSS-style length to points. Supports `px`, `em` (14pt) and
/// `var(--name, fallback)`, using the fallback.
pub fn length_to_points(length: &str) -> Option<f32> {
    const EM: f32 = 14.0;

    let length = length.trim();
    if let Some(inner) = length.strip_prefix("var(").and_then(|s| s.strip_suffix(')')) {
        let (_, fallback) = inner.split_once(',')?;
        return length_to_points(fallback);
    }
    if let Some(num) = length.strip_suffix("px") {
        return num.trim().parse().ok();
    }
    if let Some(num) = length.strip_suffix("em") {
        return num.trim().parse::<f32>().ok().map(|v| v * EM);
    }
    length.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{EditorConfig, length_to_points};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_dialog_conventions() {
        let cfg = EditorConfig::default();
        assert!(cfg.check_for_unsaved_changes);
        assert!(!cfg.is_multiline());
        assert_eq!(cfg.dialog.width.as_deref(), Some("30em"));
        assert_eq!(cfg.multiline_field.height.as_deref(), Some("6.5em"));
        assert_eq!(cfg.class_name.as_deref(), Some("localized-string-editor"));
        assert_eq!(cfg.save.theme.as_deref(), Some("primary"));
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let cfg: EditorConfig = serde_json::from_str(
            r#"{ "multiline": true, "checkForUnsavedChanges": false, "dialog": { "maxHeight": "40em" } }"#,
        )
        .unwrap();
        assert!(cfg.is_multiline());
        assert!(!cfg.check_for_unsaved_changes);
        assert_eq!(cfg.dialog.max_height.as_deref(), Some("40em"));
        assert_eq!(cfg.dialog.width.as_deref(), Some("30em"));
        assert_eq!(cfg.title, "Localized value");
    }

    #[test]
    fn builders_set_options() {
        let cfg = EditorConfig::default()
            .with_multiline(false)
            .with_width(None)
            .with_min_height(Some("10em".to_string()));
        assert_eq!(cfg.multiline, Some(false));
        assert_eq!(cfg.dialog.width, None);
        assert_eq!(cfg.dialog.min_height.as_deref(), Some("10em"));
    }

    #[test]
    fn length_conversion() {
        assert_eq!(length_to_points("480px"), Some(480.0));
        assert_eq!(length_to_points("2em"), Some(28.0));
        assert_eq!(
            length_to_points("var(--localized-string-editor-width, 30em)"),
            Some(420.0)
        );
        assert_eq!(length_to_points("auto"), None);
    }
}
