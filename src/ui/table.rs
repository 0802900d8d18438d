use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::EXPORT_COLUMNS;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Render the filtered titles as a scrollable table.  Columns match the export.
pub fn filtered_table(ui: &mut Ui, state: &AppState, max_height: f32) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let rows = &state.visible_indices;

    ui.push_id("filtered_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(40.0))
            .column(Column::initial(220.0).at_least(80.0).clip(true))
            .column(Column::initial(70.0))
            .column(Column::initial(160.0).clip(true))
            .column(Column::initial(80.0))
            .column(Column::remainder().clip(true))
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                for name in EXPORT_COLUMNS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let n = row.index();
                    let Some(title) = rows.get(n).and_then(|&i| ds.titles.get(i)) else {
                        return;
                    };
                    row.col(|ui: &mut Ui| {
                        ui.label(n.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(title.title.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(title.kind.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(title.country_or_empty());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(title.year_added().map(|y| y.to_string()).unwrap_or_default());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(title.listed_in_or_empty());
                    });
                });
            });
    });
}
