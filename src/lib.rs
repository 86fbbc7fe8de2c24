//! Localized string values for multilingual applications.
//! Provides the `LocalizedValue` locale -> text map with its JSON storage form, a
//! datatype adapter formatting values in the current locale, and the state machine
//! behind a multi-locale edit dialog. The egui demo hosts that dialog for a small
//! product catalog.

pub mod catalog;
pub mod datatype;
pub mod editor;
mod error;
mod gui;
pub mod locale;
pub mod settings;
pub mod statics;
mod value;

pub use catalog::Catalog;
pub use datatype::{
    DATATYPE_ID, FixedLocale, LocaleContext, LocalizedValueDatatype, from_column, to_column,
};
pub use error::{EditorError, ParseError, SerializationError};
pub use gui::run_gui;
pub use locale::{AvailableLocales, LocaleKey};
pub use settings::Settings;
pub use value::LocalizedValue;
