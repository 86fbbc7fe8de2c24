//! The localized value edit dialog as a toolkit-independent state machine.
//!
//! The editor owns one cached [`EditField`] per available locale. Opening
//! (`execute`) reseeds every field from the target's current value. Edits mark
//! the session dirty and validate the field; leaving a field validates it too.
//! `save` re-checks every field and hands a new [`LocalizedValue`] covering
//! every available locale back to the target.
//! A GUI renders [`LocalizedValueEditor::fields`] and forwards user input.

pub mod config;
pub mod field;
pub mod shortcut;
pub mod target;
pub mod validator;

use crate::error::EditorError;
use crate::locale::{AvailableLocales, LocaleKey};
use crate::value::LocalizedValue;
use config::EditorConfig;
use field::{EditField, FieldContext, FieldId, FieldProvider};
use indexmap::IndexMap;
use shortcut::{DialogCommand, KeyPress, Platform, ShortcutSet};
use std::fmt;
use target::{EditTarget, PropertyMeta};
use tracing::{debug, trace};
use validator::{Validator, ValidatorHandle, ValidatorRegistry};

const FIELD_CLASS_NAME: &str = "localized-string-editor-field";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Closed,
    Open,
    /// Cancel was requested with unsaved edits; waiting for the user.
    ConfirmDiscard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Closed,
    ConfirmationRequired,
}

pub struct LocalizedValueEditor {
    locales: AvailableLocales,
    config: EditorConfig,
    platform: Platform,
    field_provider: Option<FieldProvider>,
    validators: ValidatorRegistry,
    // Never evicted: keys are limited to `locales`.
    fields: IndexMap<LocaleKey, EditField>,
    next_field_id: u64,
    state: EditorState,
    dirty: bool,
    focused: Option<LocaleKey>,
    focus_requested: bool,
    shortcuts: Option<ShortcutSet>,
}

impl LocalizedValueEditor {
    pub fn new(locales: AvailableLocales, config: EditorConfig) -> Result<Self, EditorError> {
        if locales.is_empty() {
            return Err(EditorError::Precondition(
                "at least one available locale is required",
            ));
        }

        Ok(Self {
            fields: IndexMap::with_capacity(locales.len()),
            locales,
            config,
            platform: Platform::current(),
            field_provider: None,
            validators: ValidatorRegistry::default(),
            next_field_id: 1,
            state: EditorState::Closed,
            dirty: false,
            focused: None,
            focus_requested: false,
            shortcuts: None,
        })
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Replaces the built-in single/multi-line choice for fields created from
    /// now on.
    pub fn set_field_provider(&mut self, provider: Option<FieldProvider>) {
        self.field_provider = provider;
    }

    pub fn with_field_provider(
        mut self,
        provider: impl Fn(&FieldContext<'_>) -> EditField + 'static,
    ) -> Self {
        self.field_provider = Some(Box::new(provider));
        self
    }

    /// Adds a validator run against every locale's field.
    pub fn add_validator(&mut self, validator: Validator) -> ValidatorHandle {
        self.validators.add(validator)
    }

    /// Removes a validator and re-checks fields that currently show an error.
    pub fn remove_validator(&mut self, handle: ValidatorHandle) -> bool {
        if !self.validators.remove(handle) {
            return false;
        }
        let flagged: Vec<LocaleKey> = self
            .fields
            .iter()
            .filter(|(_, f)| f.is_invalid())
            .map(|(l, _)| l.clone())
            .collect();
        for locale in flagged {
            self.validate_field(&locale);
        }
        true
    }

    pub fn with_validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        for validator in validators {
            self.validators.add(validator);
        }
        self
    }

    pub fn available_locales(&self) -> &AvailableLocales {
        &self.locales
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// True while the dialog is shown, including during a discard confirmation.
    pub fn is_open(&self) -> bool {
        self.state != EditorState::Closed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Opens the dialog for `target`, reseeding every field from its value.
    pub fn execute(&mut self, target: &dyn EditTarget) {
        let property = target.property();
        let source = target.value();

        let locales: Vec<LocaleKey> = self.locales.keys().cloned().collect();
        for locale in locales {
            if !self.fields.contains_key(&locale) {
                let field = self.create_field(&locale, property);
                debug!(locale = %locale, id = field.id().0, kind = ?field.kind(), "created edit field");
                self.fields.insert(locale.clone(), field);
            }

            let text = source.map(|v| v.get(&locale)).unwrap_or("");
            if let Some(field) = self.fields.get_mut(&locale) {
                field.seed(text);
            }
        }

        // Seeding is not a user edit.
        self.dirty = false;
        self.state = EditorState::Open;
        self.shortcuts = Some(ShortcutSet::for_platform(self.platform));
        let first = self.locales.keys().next().cloned();
        self.request_focus(first);
        debug!(
            fields = self.fields.len(),
            has_value = source.is_some(),
            "opened localized value editor"
        );
    }

    fn create_field(&mut self, locale: &LocaleKey, property: Option<&PropertyMeta>) -> EditField {
        let mut field = if let Some(provider) = &self.field_provider {
            provider(&FieldContext { locale, property })
        } else if self.is_multiline_for(property) {
            EditField::multi_line().with_size(self.config.multiline_field.clone())
        } else {
            EditField::single_line()
        };

        let id = FieldId(self.next_field_id);
        self.next_field_id += 1;

        let label = self
            .locales
            .display_name(locale)
            .map(str::to_string)
            .unwrap_or_else(|| locale.display_name());
        field.adopt(id, locale.clone(), &label);
        field.add_class_name(FIELD_CLASS_NAME);

        if let Some(property) = property {
            if property.is_required() {
                field.set_required(true);
            }
            field.set_default_required_message(property.default_required_message());
        }

        field
    }

    fn is_multiline_for(&self, property: Option<&PropertyMeta>) -> bool {
        // An explicit setting wins over property metadata.
        match self.config.multiline {
            Some(multiline) => multiline,
            None => property.is_some_and(|p| p.long_text),
        }
    }

    /// Fields in configured locale order. Empty until the first `execute`.
    pub fn fields(&self) -> impl Iterator<Item = &EditField> {
        self.locales.keys().filter_map(|l| self.fields.get(l))
    }

    pub fn field(&self, locale: &LocaleKey) -> Option<&EditField> {
        self.fields.get(locale)
    }

    /// Applies a user edit to one locale's field and validates that field.
    pub fn set_field_text(&mut self, locale: &LocaleKey, text: &str) -> Result<(), EditorError> {
        self.ensure_open()?;
        let field = self
            .fields
            .get_mut(locale)
            .ok_or_else(|| EditorError::UnknownLocale(locale.clone()))?;

        if !field.set_text(text) {
            return Ok(());
        }
        self.dirty = true;
        self.validate_field(locale);
        Ok(())
    }

    /// Validates the field the user just left.
    pub fn blur(&mut self, locale: &LocaleKey) -> Result<(), EditorError> {
        self.ensure_open()?;
        if !self.validate_field(locale) {
            return Err(EditorError::UnknownLocale(locale.clone()));
        }
        Ok(())
    }

    /// Runs the required check, then the validators. Returns false for an
    /// unknown locale.
    fn validate_field(&mut self, locale: &LocaleKey) -> bool {
        let Some(field) = self.fields.get_mut(locale) else {
            return false;
        };
        let failure = field
            .required_failure()
            .or_else(|| self.validators.run(field.text(), locale).err());
        trace!(locale = %locale, valid = failure.is_none(), "validated edit field");
        field.set_error(failure);
        true
    }

    /// All fields currently pass validation.
    pub fn is_valid(&self) -> bool {
        self.fields().all(|f| !f.is_invalid())
    }

    pub fn is_save_enabled(&self) -> bool {
        self.state == EditorState::Open && self.is_valid()
    }

    pub fn invalid_locales(&self) -> Vec<LocaleKey> {
        self.fields()
            .filter(|f| f.is_invalid())
            .filter_map(|f| f.locale().cloned())
            .collect()
    }

    /// Validates every field, then commits their text to `target` and closes
    /// the dialog.
    pub fn save(&mut self, target: &mut dyn EditTarget) -> Result<LocalizedValue, EditorError> {
        self.ensure_open()?;
        let locales: Vec<LocaleKey> = self.fields.keys().cloned().collect();
        for locale in &locales {
            self.validate_field(locale);
        }
        let invalid = self.invalid_locales();
        if !invalid.is_empty() {
            return Err(EditorError::InvalidFields(invalid));
        }

        let value: LocalizedValue = self
            .locales
            .keys()
            .map(|locale| {
                let text = self.fields.get(locale).map(EditField::text).unwrap_or("");
                (locale.clone(), text.to_string())
            })
            .collect();

        target.set_value_from_client(value.clone());
        self.dirty = false;
        debug!(locales = value.len(), "saved localized value");
        self.close();
        Ok(value)
    }

    /// Closes the dialog, or asks for a discard confirmation when there are
    /// unsaved edits and unsaved-change checking is enabled.
    pub fn cancel(&mut self) -> Result<CancelOutcome, EditorError> {
        match self.state {
            EditorState::Closed => Err(EditorError::NotOpen),
            EditorState::ConfirmDiscard => Ok(CancelOutcome::ConfirmationRequired),
            EditorState::Open => {
                if self.config.check_for_unsaved_changes && self.dirty {
                    self.state = EditorState::ConfirmDiscard;
                    debug!("unsaved changes, asking for discard confirmation");
                    Ok(CancelOutcome::ConfirmationRequired)
                } else {
                    self.close();
                    Ok(CancelOutcome::Closed)
                }
            }
        }
    }

    /// The user accepted losing the edits.
    pub fn confirm_discard(&mut self) -> Result<(), EditorError> {
        if self.state != EditorState::ConfirmDiscard {
            return Err(EditorError::NoConfirmationPending);
        }
        debug!("discarded unsaved changes");
        self.close();
        Ok(())
    }

    /// The user chose to keep editing; edits stay as they were.
    pub fn reject_discard(&mut self) -> Result<(), EditorError> {
        if self.state != EditorState::ConfirmDiscard {
            return Err(EditorError::NoConfirmationPending);
        }
        self.state = EditorState::Open;
        let target = self
            .invalid_locales()
            .into_iter()
            .next()
            .or_else(|| self.locales.keys().next().cloned());
        self.request_focus(target);
        Ok(())
    }

    fn close(&mut self) {
        self.state = EditorState::Closed;
        self.shortcuts = None;
        self.focused = None;
        self.focus_requested = false;
        debug!("closed localized value editor");
    }

    fn ensure_open(&self) -> Result<(), EditorError> {
        match self.state {
            EditorState::Open => Ok(()),
            EditorState::Closed => Err(EditorError::NotOpen),
            EditorState::ConfirmDiscard => Err(EditorError::AwaitingConfirmation),
        }
    }

    fn request_focus(&mut self, locale: Option<LocaleKey>) {
        self.focus_requested = locale.is_some();
        self.focused = locale;
    }

    pub fn focused_locale(&self) -> Option<&LocaleKey> {
        self.focused.as_ref()
    }

    /// Records focus moved by the user; the field losing focus is validated.
    pub fn focus(&mut self, locale: &LocaleKey) -> Result<(), EditorError> {
        self.ensure_open()?;
        if !self.fields.contains_key(locale) {
            return Err(EditorError::UnknownLocale(locale.clone()));
        }
        if let Some(previous) = self.focused.replace(locale.clone())
            && &previous != locale
        {
            self.validate_field(&previous);
        }
        Ok(())
    }

    /// A pending programmatic focus move, consumed by the renderer once.
    pub fn take_focus_request(&mut self) -> Option<LocaleKey> {
        if !std::mem::take(&mut self.focus_requested) {
            return None;
        }
        self.focused.clone()
    }

    /// Shortcuts registered for the current dialog; `None` once it is closed.
    pub fn shortcuts(&self) -> Option<&ShortcutSet> {
        self.shortcuts.as_ref()
    }

    /// Runs the command bound to `press`, if any. A save shortcut does nothing
    /// while the Save button is disabled.
    pub fn handle_key(
        &mut self,
        press: KeyPress,
        target: &mut dyn EditTarget,
    ) -> Result<Option<DialogCommand>, EditorError> {
        if self.state != EditorState::Open {
            return Ok(None);
        }
        let Some(command) = self.shortcuts.as_ref().and_then(|s| s.resolve(press)) else {
            return Ok(None);
        };

        match command {
            DialogCommand::Save => {
                if self.is_save_enabled() {
                    // Fields failing on save are flagged and the dialog stays open.
                    match self.save(target) {
                        Ok(_) | Err(EditorError::InvalidFields(_)) => {}
                        Err(e) => return Err(e),
                    }
                }
            }
            DialogCommand::Cancel => {
                self.cancel()?;
            }
        }
        Ok(Some(command))
    }
}

impl fmt::Debug for LocalizedValueEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizedValueEditor")
            .field("locales", &self.locales)
            .field("config", &self.config)
            .field("platform", &self.platform)
            .field("has_field_provider", &self.field_provider.is_some())
            .field("validators", &self.validators.len())
            .field("fields", &self.fields)
            .field("state", &self.state)
            .field("dirty", &self.dirty)
            .field("focused", &self.focused)
            .finish()
    }
}
