use anyhow::Result;
use catalog_explorer::app::CatalogExplorerApp;
use catalog_explorer::cli;
use catalog_explorer::state::AppState;
use clap::Parser;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    if args.is_headless() {
        return cli::run_headless(&args);
    }

    let mut state = AppState::with_filters(args.filter_params());
    state.open(&args.path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Catalog Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(CatalogExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
