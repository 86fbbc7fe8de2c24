use crate::locale::LocaleKey;
use std::{fmt, rc::Rc};
use thiserror::Error;

/// A rejected field value. Shown next to the field; blocks saving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    message: String,
}

impl ValidationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

type ValidateFn = dyn Fn(&str, &LocaleKey) -> Result<(), ValidationFailure>;

/// Checks the text of one locale's field.
#[derive(Clone)]
pub struct Validator(Rc<ValidateFn>);

impl Validator {
    pub fn new(f: impl Fn(&str, &LocaleKey) -> Result<(), ValidationFailure> + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Rejects non-empty text shorter than `min` characters.
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |text, _| {
            if !text.is_empty() && text.chars().count() < min {
                Err(ValidationFailure::new(message.clone()))
            } else {
                Ok(())
            }
        })
    }

    /// Rejects text longer than `max` characters.
    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |text, _| {
            if text.chars().count() > max {
                Err(ValidationFailure::new(message.clone()))
            } else {
                Ok(())
            }
        })
    }

    pub fn validate(&self, text: &str, locale: &LocaleKey) -> Result<(), ValidationFailure> {
        (self.0)(text, locale)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Returned by `add_validator`; removes that validator again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorHandle(u64);

#[derive(Debug, Default)]
pub(crate) struct ValidatorRegistry {
    next_id: u64,
    entries: Vec<(ValidatorHandle, Validator)>,
}

impl ValidatorRegistry {
    pub(crate) fn add(&mut self, validator: Validator) -> ValidatorHandle {
        let handle = ValidatorHandle(self.next_id);
        self.next_id += 1;
        self.entries.push((handle, validator));
        handle
    }

    pub(crate) fn remove(&mut self, handle: ValidatorHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Runs validators in registration order; stops at the first failure.
    pub(crate) fn run(&self, text: &str, locale: &LocaleKey) -> Result<(), ValidationFailure> {
        self.entries
            .iter()
            .try_for_each(|(_, v)| v.validate(text, locale))
    }
}
