//! Demo application settings: which locales are edited, the initial UI locale
//! and the edit dialog options.

use crate::editor::config::EditorConfig;
use crate::{AvailableLocales, LocaleKey, statics};
use anyhow::Context;
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::info;

/// A locale given either as a bare tag or with an explicit display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LocaleEntry {
    Tag(LocaleKey),
    Named { tag: LocaleKey, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub available_locales: Vec<LocaleEntry>,
    pub current_locale: Option<LocaleKey>,
    pub editor: EditorConfig,
    /// Minimum description length enforced by the demo validator; 0 disables it.
    pub description_min_length: usize,
    /// Edit descriptions in a monospace code editor instead of plain text areas.
    pub code_description: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            available_locales: statics::DEFAULT_LOCALES
                .iter()
                .filter_map(|tag| LocaleKey::parse(tag).ok())
                .map(LocaleEntry::Tag)
                .collect(),
            current_locale: None,
            editor: EditorConfig::default(),
            description_min_length: 5,
            code_description: true,
        }
    }
}

impl Settings {
    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
        let settings: Settings = serde_json::from_str(&text).context("parsing settings JSON")?;
        anyhow::ensure!(
            !settings.available_locales.is_empty(),
            "settings must list at least one available locale"
        );
        info!(path = %path.display(), locales = settings.available_locales.len(), "loaded settings");
        Ok(settings)
    }

    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn available_locales(&self) -> AvailableLocales {
        AvailableLocales::new(self.available_locales.iter().map(|entry| match entry {
            LocaleEntry::Tag(tag) => (tag.clone(), tag.display_name()),
            LocaleEntry::Named { tag, name } => (tag.clone(), name.clone()),
        }))
    }

    /// The configured current locale, else the first available one.
    pub fn current_locale(&self) -> Option<LocaleKey> {
        self.current_locale.clone().or_else(|| {
            self.available_locales.first().map(|entry| match entry {
                LocaleEntry::Tag(tag) | LocaleEntry::Named { tag, .. } => tag.clone(),
            })
        })
    }
}
