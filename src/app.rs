use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, Page};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SurveyAnalyzerApp {
    pub state: AppState,
}

impl SurveyAnalyzerApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Files dropped onto the window count as an upload.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        if let Some(bytes) = &file.bytes {
            self.state.ingest_bytes(&file.name, bytes);
        } else if let Some(path) = &file.path {
            self.state.ingest_path(path);
        } else {
            log::warn!("Dropped file '{}' carried no data", file.name);
            return;
        }
        self.state.page = Page::Upload;
    }
}

impl eframe::App for SurveyAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => panels::home_page(ui),
            Page::Upload => panels::upload_page(ui, &mut self.state),
            Page::Analyze => panels::analyze_page(ui, &self.state),
            Page::Charts => plot::charts_page(ui, &mut self.state),
        });
    }
}
