use crate::catalog::{Catalog, ProductField, ProductTarget};
use crate::editor::{
    EditorState, LocalizedValueEditor,
    config::{ButtonStyle, EditorConfig, length_to_points},
    field::{EditField, FieldContext, FieldKind},
    shortcut::{DialogCommand, Key, KeyPress, Modifiers},
    validator::Validator,
};
use crate::settings::Settings;
use crate::{AvailableLocales, FixedLocale, LocaleKey, LocalizedValueDatatype, statics};
use anyhow::Context;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::path::PathBuf;
use tracing::{info, warn};

// Approximate height of one text line, used to turn field heights into rows.
const LINE_HEIGHT: f32 = 18.0;
const DEFAULT_MULTILINE_ROWS: usize = 4;

pub fn run_gui(settings: &Settings) -> anyhow::Result<()> {
    let app = LocstrApp::new(settings)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 700.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("running GUI: {e}"))
}

/// The demo application state: a product catalog whose localized properties
/// are edited through one [`LocalizedValueEditor`] per property.
struct LocstrApp {
    catalog: Catalog,
    dialog_dir: Option<PathBuf>,
    locales: AvailableLocales,
    datatype: LocalizedValueDatatype<FixedLocale>,
    selected_product: Option<u64>,
    name_editor: LocalizedValueEditor,
    description_editor: LocalizedValueEditor,
    // At most one dialog at a time; the editor itself doesn't guard a target.
    editing: Option<(u64, ProductField)>,
    status: String,
    last_error: Option<String>,
}

/// Snapshot of a field for rendering, so the editor can be mutated meanwhile.
struct FieldView {
    locale: LocaleKey,
    label: String,
    kind: FieldKind,
    text: String,
    required: bool,
    rows: usize,
    error: Option<String>,
}

impl LocstrApp {
    fn new(settings: &Settings) -> anyhow::Result<Self> {
        let locales = settings.available_locales();
        let current = settings
            .current_locale()
            .context("settings define no available locale")?;

        let name_editor = LocalizedValueEditor::new(locales.clone(), settings.editor.clone())?;
        let description_editor = description_editor(settings, locales.clone())?;

        let catalog = Catalog::sample()?;
        Ok(Self {
            selected_product: catalog.products.first().map(|p| p.id),
            catalog,
            dialog_dir: None,
            locales,
            datatype: LocalizedValueDatatype::new(FixedLocale(current)),
            name_editor,
            description_editor,
            editing: None,
            status: String::new(),
            last_error: None,
        })
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new().add_filter("Product catalog", &["json"]);
        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }
        dlg
    }

    fn open_file(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };

        match Catalog::load_path(&path) {
            Ok(catalog) => {
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.status = format!("Loaded {}", path.display());
                self.selected_product = catalog.products.first().map(|p| p.id);
                self.catalog = catalog;
                self.last_error = None;
            }
            Err(e) => {
                warn!("failed to load catalog: {e:#}");
                self.last_error = Some(format!("Failed to load: {e:#}"));
            }
        }
    }

    fn save_file_as(&mut self) {
        let mut dlg = self.file_dialog();
        if let Some(file_name) = self
            .catalog
            .source_path
            .as_ref()
            .and_then(|p| p.file_name())
        {
            dlg = dlg.set_file_name(file_name.to_string_lossy());
        }

        let Some(path) = dlg.save_file() else {
            return;
        };

        if let Err(e) = self.catalog.save_to_path(&path) {
            warn!("failed to save catalog: {e:#}");
            self.last_error = Some(format!("Failed to save: {e:#}"));
        } else {
            self.dialog_dir = path.parent().map(PathBuf::from);
            self.status = format!("Saved {}", path.display());
            self.last_error = None;
        }
    }

    fn open_editor(&mut self, product_id: u64, field: ProductField) {
        if self.editing.is_some() {
            return;
        }
        let editor = match field {
            ProductField::Name => &mut self.name_editor,
            ProductField::Description => &mut self.description_editor,
        };
        let Some(product) = self.catalog.product_mut(product_id) else {
            self.last_error = Some(statics::EN_ERR_PRODUCT_MISSING.to_string());
            return;
        };

        editor.execute(&ProductTarget::new(product, field));
        self.editing = Some((product_id, field));
    }

    fn render_locale_selector(&mut self, ui: &mut egui::Ui) {
        let current = self.datatype.context().0.clone();
        let mut selected = current.clone();
        let current_name = self
            .locales
            .display_name(&current)
            .unwrap_or(current.as_str())
            .to_string();

        egui::ComboBox::from_id_salt("current_locale")
            .selected_text(current_name)
            .show_ui(ui, |ui| {
                for (locale, name) in self.locales.iter() {
                    ui.selectable_value(&mut selected, locale.clone(), name);
                }
            });

        if selected != current {
            info!(locale = %selected, "switched current locale");
            self.datatype = LocalizedValueDatatype::new(FixedLocale(selected));
        }
    }

    fn render_product_table(&mut self, ui: &mut egui::Ui) {
        if self.catalog.products.is_empty() {
            ui.label(statics::EN_NO_PRODUCTS);
            return;
        }

        let row_h = 20.0;
        let mut clicked = None;
        TableBuilder::new(ui)
            .striped(true)
            .sense(egui::Sense::click())
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(40.0))
            .column(Column::initial(140.0).resizable(true))
            .column(Column::remainder())
            .header(row_h, |mut header| {
                header.col(|ui| {
                    ui.strong(statics::EN_COL_ID);
                });
                header.col(|ui| {
                    ui.strong(statics::EN_COL_NAME);
                });
                header.col(|ui| {
                    ui.strong(statics::EN_COL_DESCRIPTION);
                });
            })
            .body(|mut body| {
                for product in &self.catalog.products {
                    body.row(row_h, |mut row| {
                        row.set_selected(self.selected_product == Some(product.id));
                        row.col(|ui| {
                            ui.label(product.id.to_string());
                        });
                        row.col(|ui| {
                            ui.label(self.datatype.format(product.name.as_ref()));
                        });
                        row.col(|ui| {
                            let text = self.datatype.format(product.description.as_ref());
                            ui.label(text.lines().next().unwrap_or(statics::EN_EMPTY));
                        });
                        if row.response().clicked() {
                            clicked = Some(product.id);
                        }
                    });
                }
            });

        if clicked.is_some() {
            self.selected_product = clicked;
        }
    }

    fn render_product_details(&mut self, ui: &mut egui::Ui) {
        ui.heading(statics::EN_HEADING_DETAILS);
        ui.separator();

        let Some(id) = self.selected_product else {
            ui.label(statics::EN_SELECT_PRODUCT);
            return;
        };
        let Some(product) = self.catalog.product(id) else {
            ui.label(statics::EN_SELECT_PRODUCT);
            return;
        };

        let rows: Vec<(ProductField, String)> = [ProductField::Name, ProductField::Description]
            .into_iter()
            .map(|f| (f, self.datatype.format(product.value(f))))
            .collect();
        let can_edit = self.editing.is_none();
        let mut open_request = None;

        egui::Grid::new("product_details")
            .num_columns(3)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label(statics::EN_COL_ID);
                ui.label(id.to_string());
                ui.end_row();

                for (field, mut shown) in rows {
                    let label = match field {
                        ProductField::Name => statics::EN_COL_NAME,
                        ProductField::Description => statics::EN_COL_DESCRIPTION,
                    };
                    let property = field.property();
                    if property.is_required() {
                        ui.label(format!("{label}{}", statics::EN_REQUIRED_MARK));
                    } else {
                        ui.label(label);
                    }

                    // Read-only: the text is only changed through the dialog.
                    let display = if property.long_text {
                        egui::TextEdit::multiline(&mut shown).desired_rows(3)
                    } else {
                        egui::TextEdit::singleline(&mut shown)
                    };
                    ui.add(display.interactive(false).desired_width(360.0));

                    if ui
                        .add_enabled(can_edit, egui::Button::new(statics::EN_GLYPH_GLOBE))
                        .on_hover_text(statics::EN_HINT_EDIT_LOCALIZED)
                        .clicked()
                    {
                        open_request = Some(field);
                    }
                    ui.end_row();
                }
            });

        ui.add_space(12.0);
        if ui
            .add_enabled(can_edit, egui::Button::new(statics::EN_BTN_DELETE_PRODUCT))
            .clicked()
        {
            self.catalog.remove_product(id);
            self.selected_product = self.catalog.products.first().map(|p| p.id);
            return;
        }

        if let Some(field) = open_request {
            self.open_editor(id, field);
        }
    }

    fn render_editor_window(&mut self, ctx: &egui::Context) {
        let Some((product_id, field)) = self.editing else {
            return;
        };
        let editor = match field {
            ProductField::Name => &mut self.name_editor,
            ProductField::Description => &mut self.description_editor,
        };
        let Some(product) = self.catalog.product_mut(product_id) else {
            self.editing = None;
            self.last_error = Some(statics::EN_ERR_PRODUCT_MISSING.to_string());
            return;
        };
        let mut target = ProductTarget::new(product, field);
        let mut saved = false;

        // Consume shortcut keys before text inputs see them.
        if let Some(shortcuts) = editor.shortcuts().cloned() {
            let presses = ctx.input_mut(|i| {
                let mut out = Vec::new();
                i.events.retain(|event| match key_press(event) {
                    Some(press) if shortcuts.resolve(press).is_some() => {
                        out.push(press);
                        false
                    }
                    _ => true,
                });
                out
            });
            for press in presses {
                let was_open = editor.is_open();
                match editor.handle_key(press, &mut target) {
                    Ok(Some(DialogCommand::Save)) if was_open && !editor.is_open() => saved = true,
                    Ok(_) => {}
                    Err(e) => warn!("shortcut failed: {e}"),
                }
            }
        }

        let config = editor.config().clone();
        let confirming = editor.state() == EditorState::ConfirmDiscard;
        let mut command = None;
        let mut open = editor.is_open();

        if open {
            dialog_window(&config, &mut open).show(ctx, |ui| {
                ui.add_enabled_ui(!confirming, |ui| {
                    render_fields(ui, editor);
                    ui.separator();
                    ui.horizontal(|ui| {
                        let save = styled_button(ui, &config.save);
                        if ui.add_enabled(editor.is_save_enabled(), save).clicked() {
                            command = Some(DialogCommand::Save);
                        }
                        let cancel = styled_button(ui, &config.cancel);
                        if ui.add(cancel).clicked() {
                            command = Some(DialogCommand::Cancel);
                        }
                    });
                });
            });
        }

        // The window's close button acts like Cancel.
        if !open && editor.state() == EditorState::Open {
            command = Some(DialogCommand::Cancel);
        }

        match command {
            Some(DialogCommand::Save) => match editor.save(&mut target) {
                Ok(_) => saved = true,
                Err(e) => self.last_error = Some(e.to_string()),
            },
            Some(DialogCommand::Cancel) => {
                if let Err(e) = editor.cancel() {
                    warn!("cancel failed: {e}");
                }
            }
            None => {}
        }

        if editor.state() == EditorState::ConfirmDiscard {
            let answer = confirm_discard_window(ctx);
            let res = match answer {
                Some(true) => editor.confirm_discard(),
                Some(false) => editor.reject_discard(),
                None => Ok(()),
            };
            if let Err(e) = res {
                warn!("discard confirmation failed: {e}");
            }
        }

        let still_open = editor.is_open();
        if saved {
            self.catalog.refresh_dirty();
            self.status = format!("Product {product_id}: {:?} updated", field);
            self.last_error = None;
        }
        if !still_open {
            self.editing = None;
        }
    }
}

/// The description editor carries the length validator and, when enabled,
/// renders every locale in the code editor widget.
fn description_editor(
    settings: &Settings,
    locales: AvailableLocales,
) -> anyhow::Result<LocalizedValueEditor> {
    let mut editor = LocalizedValueEditor::new(locales, settings.editor.clone())?;
    let min = settings.description_min_length;
    if min > 0 {
        editor.add_validator(Validator::min_length(
            min,
            format!("Must be at least {min} characters"),
        ));
    }
    if settings.code_description {
        let size = settings.editor.multiline_field.clone();
        editor = editor.with_field_provider(move |_ctx: &FieldContext<'_>| {
            EditField::custom(statics::WIDGET_CODE).with_size(size.clone())
        });
    }
    Ok(editor)
}

fn dialog_window<'a>(config: &EditorConfig, open: &'a mut bool) -> egui::Window<'a> {
    let mut window = egui::Window::new(config.title.as_str())
        .id(egui::Id::new("localized_value_editor"))
        .collapsible(false)
        .resizable(true)
        .open(open);

    let size = &config.dialog;
    let points = |v: &Option<String>| v.as_deref().and_then(length_to_points);
    if let Some(w) = points(&size.width) {
        window = window.default_width(w);
    }
    if let Some(w) = points(&size.min_width) {
        window = window.min_width(w);
    }
    if let Some(w) = points(&size.max_width) {
        window = window.max_width(w);
    }
    if let Some(h) = points(&size.height) {
        window = window.default_height(h);
    }
    if let Some(h) = points(&size.min_height) {
        window = window.min_height(h);
    }
    if let Some(h) = points(&size.max_height) {
        window = window.max_height(h);
    }
    window
}

fn render_fields(ui: &mut egui::Ui, editor: &mut LocalizedValueEditor) {
    let focus_target = editor.take_focus_request();
    let views: Vec<FieldView> = editor
        .fields()
        .filter_map(|f| {
            let rows = f
                .size()
                .and_then(|s| s.height.as_deref())
                .and_then(length_to_points)
                .map(|h| (h / LINE_HEIGHT).round().max(1.0) as usize)
                .unwrap_or(DEFAULT_MULTILINE_ROWS);
            Some(FieldView {
                locale: f.locale()?.clone(),
                label: f.label().to_string(),
                kind: f.kind().clone(),
                text: f.text().to_string(),
                required: f.is_required(),
                rows,
                error: f.error().map(|e| e.message().to_string()),
            })
        })
        .collect();

    for view in views {
        if view.required {
            ui.label(format!("{}{}", view.label, statics::EN_REQUIRED_MARK));
        } else {
            ui.label(view.label.as_str());
        }

        let mut text = view.text;
        let input = match &view.kind {
            FieldKind::SingleLine => egui::TextEdit::singleline(&mut text),
            FieldKind::MultiLine => egui::TextEdit::multiline(&mut text).desired_rows(view.rows),
            FieldKind::Custom(widget) if widget == statics::WIDGET_CODE => {
                egui::TextEdit::multiline(&mut text)
                    .code_editor()
                    .desired_rows(view.rows)
            }
            FieldKind::Custom(_) => egui::TextEdit::singleline(&mut text),
        };
        let resp = ui.add(input.desired_width(f32::INFINITY));

        if focus_target.as_ref() == Some(&view.locale) {
            resp.request_focus();
        }
        if resp.gained_focus() {
            editor.focus(&view.locale).ok();
        }
        if resp.lost_focus() {
            editor.blur(&view.locale).ok();
        }
        if resp.changed()
            && let Err(e) = editor.set_field_text(&view.locale, &text)
        {
            warn!("field edit rejected: {e}");
        }

        if let Some(message) = view.error {
            ui.colored_label(ui.visuals().error_fg_color, message);
        }
        ui.add_space(4.0);
    }
}

fn styled_button(ui: &egui::Ui, style: &ButtonStyle) -> egui::Button<'static> {
    let glyph = match style.icon.as_deref() {
        Some(statics::ICON_CHECK) => Some(statics::GLYPH_CHECK),
        Some(statics::ICON_BAN) => Some(statics::GLYPH_BAN),
        _ => None,
    };
    let text = match (glyph, style.text.as_deref()) {
        (Some(g), Some(t)) => format!("{g} {t}"),
        (Some(g), None) => g.to_string(),
        (None, Some(t)) => t.to_string(),
        (None, None) => String::new(),
    };

    let mut button = egui::Button::new(text);
    let primary = style
        .theme
        .as_deref()
        .is_some_and(|t| t.split_whitespace().any(|n| n == statics::THEME_PRIMARY));
    if primary {
        button = button.fill(ui.visuals().selection.bg_fill);
    }
    button
}

/// Returns `Some(true)` to discard, `Some(false)` to keep editing.
fn confirm_discard_window(ctx: &egui::Context) -> Option<bool> {
    let mut answer = None;
    egui::Window::new(statics::EN_WINDOW_UNSAVED)
        .id(egui::Id::new("localized_value_editor_unsaved"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(statics::EN_UNSAVED_MESSAGE);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(statics::EN_BTN_YES).clicked() {
                    answer = Some(true);
                }
                let keep = egui::Button::new(statics::EN_BTN_NO).fill(ui.visuals().selection.bg_fill);
                if ui.add(keep).clicked() {
                    answer = Some(false);
                }
            });
        });
    answer
}

fn key_press(event: &egui::Event) -> Option<KeyPress> {
    let egui::Event::Key {
        key,
        pressed: true,
        modifiers,
        ..
    } = event
    else {
        return None;
    };
    let key = match key {
        egui::Key::Enter => Key::Enter,
        egui::Key::Escape => Key::Escape,
        _ => return None,
    };
    Some(KeyPress::new(
        key,
        Modifiers {
            ctrl: modifiers.ctrl,
            meta: modifiers.mac_cmd,
            alt: modifiers.alt,
            shift: modifiers.shift,
        },
    ))
}

impl eframe::App for LocstrApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                let idle = self.editing.is_none();
                if ui
                    .add_enabled(idle, egui::Button::new(statics::EN_BTN_OPEN))
                    .clicked()
                {
                    self.open_file();
                }
                if ui
                    .add_enabled(idle, egui::Button::new(statics::EN_BTN_SAVE_AS))
                    .clicked()
                {
                    self.save_file_as();
                }

                ui.separator();
                if ui
                    .add_enabled(idle, egui::Button::new(statics::EN_BTN_NEW_PRODUCT))
                    .clicked()
                {
                    self.selected_product = Some(self.catalog.add_product());
                }

                ui.separator();
                ui.label(statics::EN_LABEL_LOCALE);
                self.render_locale_selector(ui);
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let source = self
                    .catalog
                    .source_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| statics::EN_PLACEHOLDER_UNSAVED.to_string());
                ui.monospace(source);
                if self.catalog.dirty {
                    ui.colored_label(ui.visuals().warn_fg_color, statics::EN_BADGE_DIRTY);
                }
                ui.separator();
                ui.label(self.status.as_str());
                if let Some(err) = &self.last_error {
                    ui.colored_label(ui.visuals().error_fg_color, err.as_str());
                }
            });
        });

        egui::SidePanel::left("products_panel")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.heading(statics::EN_HEADING_PRODUCTS);
                ui.separator();
                self.render_product_table(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_product_details(ui);
        });

        self.render_editor_window(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::{description_editor, key_press, styled_button};
    use crate::Settings;
    use crate::catalog::{Catalog, ProductField, ProductTarget};
    use crate::editor::config::EditorConfig;
    use crate::editor::field::FieldKind;
    use crate::editor::shortcut::{Key, KeyPress, Modifiers};
    use crate::statics;
    use eframe::egui;

    #[test]
    fn description_editor_uses_code_widget_and_length_check() {
        let settings = Settings::default();
        let mut editor = description_editor(&settings, settings.available_locales()).unwrap();
        let mut catalog = Catalog::sample().unwrap();
        let product = catalog.product_mut(2).unwrap();
        let mut target = ProductTarget::new(product, ProductField::Description);
        editor.execute(&target);

        assert!(
            editor
                .fields()
                .all(|f| f.kind() == &FieldKind::Custom(statics::WIDGET_CODE.to_string()))
        );
        assert!(editor.fields().all(|f| f.size().is_some()));

        let en = editor.fields().next().unwrap().locale().unwrap().clone();
        editor.set_field_text(&en, "tiny").unwrap();
        assert!(!editor.is_save_enabled());
        editor.set_field_text(&en, "A round table").unwrap();
        assert!(editor.save(&mut target).is_ok());
    }

    #[test]
    fn plain_description_editor_without_code_widget() {
        let settings = Settings {
            code_description: false,
            description_min_length: 0,
            ..Settings::default()
        };
        let mut editor = description_editor(&settings, settings.available_locales()).unwrap();
        let mut catalog = Catalog::sample().unwrap();
        let product = catalog.product_mut(1).unwrap();
        editor.execute(&ProductTarget::new(product, ProductField::Description));
        assert!(editor.fields().all(|f| f.kind() == &FieldKind::MultiLine));
    }

    #[test]
    fn key_press_maps_enter_and_escape_only() {
        let event = |key, modifiers, pressed| egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers,
        };

        assert_eq!(
            key_press(&event(egui::Key::Enter, egui::Modifiers::CTRL, true)),
            Some(KeyPress::new(Key::Enter, Modifiers::CTRL))
        );
        assert_eq!(
            key_press(&event(egui::Key::Escape, egui::Modifiers::NONE, true)),
            Some(KeyPress::new(Key::Escape, Modifiers::NONE))
        );
        assert_eq!(
            key_press(&event(egui::Key::Enter, egui::Modifiers::CTRL, false)),
            None
        );
        assert_eq!(
            key_press(&event(egui::Key::A, egui::Modifiers::NONE, true)),
            None
        );
    }

    #[test]
    fn styled_buttons_build_for_default_config() {
        let ctx = egui::Context::default();
        let cfg = EditorConfig::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let _ = styled_button(ui, &cfg.save);
                let _ = styled_button(ui, &cfg.cancel);
            });
        });
    }
}
