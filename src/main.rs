use ames_dash::app::DashboardApp;
use ames_dash::config::Config;
use ames_dash::state::AppState;
use clap::Parser;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let config = Config::parse();

    let mut state = AppState::new(config.year_mode);
    state.select_chart_value(&config.chart);
    if let Some(path) = &config.data {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ames Housing Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}
