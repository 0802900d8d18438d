use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export::{EXPORT_FILE_NAME, EXPORT_MIME};
use crate::data::filter::{TypeFilter, YearFilter};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let years: Vec<i32> = match &state.dataset {
        Some(ds) => ds.years_desc().to_vec(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Edit a copy so the view is recomputed once, after all widgets ran.
    let mut filters = state.filters.clone();

    ui.strong("Select Type");
    egui::ComboBox::from_id_salt("type_filter")
        .selected_text(filters.kind.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in TypeFilter::CHOICES {
                ui.selectable_value(&mut filters.kind, choice, choice.to_string());
            }
        });
    ui.add_space(6.0);

    ui.strong("Enter Country (optional)");
    ui.add(
        egui::TextEdit::singleline(&mut filters.country)
            .hint_text("e.g. states")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);

    ui.strong("Select Year Added");
    egui::ComboBox::from_id_salt("year_filter")
        .selected_text(filters.year.to_string())
        .height(300.0)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut filters.year, YearFilter::All, "All");
            for year in years {
                ui.selectable_value(&mut filters.year, YearFilter::Year(year), year.to_string());
            }
        });
    ui.add_space(6.0);

    ui.strong("Enter Genre Keyword (optional)");
    ui.add(
        egui::TextEdit::singleline(&mut filters.genre)
            .hint_text("e.g. comed")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(10.0);

    if ui
        .add_enabled(!filters.is_unconstrained(), egui::Button::new("Reset filters"))
        .clicked()
    {
        filters = Default::default();
    }

    state.set_filters(filters);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} titles loaded, {} shown",
                ds.len(),
                state.visible_indices.len()
            ));

            ui.separator();

            if ui
                .button("💾 Download CSV")
                .on_hover_text(format!("{EXPORT_FILE_NAME} ({EXPORT_MIME})"))
                .clicked()
            {
                save_file_dialog(state);
            }
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().weak_text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered titles")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.save_export(&path);
    }
}
