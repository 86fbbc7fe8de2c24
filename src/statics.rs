// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// English UI strings (EN_ prefix; the demo UI itself is not localized)
pub const EN_APP_TITLE: &str = "locstr: Localized String Demo";

pub const EN_BTN_OPEN: &str = "Open...";
pub const EN_BTN_SAVE_AS: &str = "Save As...";
pub const EN_BTN_NEW_PRODUCT: &str = "New Product";
pub const EN_BTN_DELETE_PRODUCT: &str = "Delete Product";
pub const EN_BTN_YES: &str = "Yes";
pub const EN_BTN_NO: &str = "No";

pub const EN_LABEL_LOCALE: &str = "Locale:";
pub const EN_HEADING_PRODUCTS: &str = "Products";
pub const EN_HEADING_DETAILS: &str = "Product";
pub const EN_SELECT_PRODUCT: &str = "Select a product.";
pub const EN_NO_PRODUCTS: &str = "No products. Add one to begin.";

pub const EN_COL_ID: &str = "ID";
pub const EN_COL_NAME: &str = "Name";
pub const EN_COL_DESCRIPTION: &str = "Description";

pub const EN_HINT_EDIT_LOCALIZED: &str = "Edit all languages";
pub const EN_GLYPH_GLOBE: &str = "🌐";
pub const EN_REQUIRED_MARK: &str = " *";

pub const EN_WINDOW_UNSAVED: &str = "Unsaved changes";
pub const EN_UNSAVED_MESSAGE: &str = "You have unsaved changes. Do you want to close without saving?";

pub const EN_BADGE_DIRTY: &str = "dirty";
pub const EN_PLACEHOLDER_UNSAVED: &str = "<unsaved>";
pub const EN_EMPTY: &str = "";

pub const EN_ERR_PRODUCT_MISSING: &str = "Could not locate the edited product";

// Button icon names understood by the editor config, and the glyphs drawn for them.
pub const ICON_CHECK: &str = "check";
pub const ICON_BAN: &str = "ban";
pub const GLYPH_CHECK: &str = "✔";
pub const GLYPH_BAN: &str = "🚫";

// Theme name that highlights a button.
pub const THEME_PRIMARY: &str = "primary";

// Custom field provider widget tag rendered as a monospace editor.
pub const WIDGET_CODE: &str = "code";

// Product entity/property names.
pub const PRODUCT_ENTITY: &str = "Product";
pub const PRODUCT_PROP_NAME: &str = "name";
pub const PRODUCT_PROP_DESCRIPTION: &str = "description";

// Default locales when no settings file is given.
pub const DEFAULT_LOCALES: [&str; 2] = ["en", "ru_RU"];
