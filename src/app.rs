use eframe::egui::{self, ScrollArea, Ui};

use crate::presenter::present;
use crate::state::AppState;
use crate::ui::charts::ChartPanel;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CatalogExplorerApp {
    pub state: AppState,
}

impl CatalogExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for CatalogExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog to explore it  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!(
                "📋 Filtered Data ({} results)",
                state.visible_indices.len()
            ));
            table::filtered_table(ui, state, 320.0);

            ui.separator();
            ui.heading("📈 Visual Analysis");

            let mut charts = ChartPanel::new(ui, &state.type_colors, &state.rating_colors);
            present(&state.summary, &mut charts);
        });
}
