mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::SurveyAnalyzerApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Survey Analyzer",
        options,
        Box::new(move |_cc| Ok(Box::new(SurveyAnalyzerApp::new(config)))),
    )
}
