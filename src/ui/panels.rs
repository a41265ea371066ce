use eframe::egui::{self, RichText, ScrollArea, Ui};
use serde::Serialize;

use crate::data::session::SessionData;
use crate::data::summary::{DescribeReport, StructuralReport};
use crate::error::Severity;
use crate::state::{AppState, Page};
use crate::ui::tables::{describe_rows, dtype_footer, string_table, structure_rows};
use crate::ui::{pipeline_error, status_label};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Survey Analyzer");
    ui.separator();

    ui.label("Navigate to");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.title());
    }

    ui.separator();
    match state.session.data() {
        SessionData::Loaded(loaded) => {
            ui.label(RichText::new(&loaded.source).strong());
            ui.label(format!(
                "{} rows × {} columns",
                loaded.dataset.row_count(),
                loaded.dataset.column_count()
            ));
        }
        SessionData::Empty => {
            ui.label("No dataset loaded.");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        if let Some(status) = &state.upload_status {
            ui.separator();
            status_label(ui, status.severity, &status.text);
        }
    });
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

pub fn home_page(ui: &mut Ui) {
    ui.heading("Welcome to the Survey Analyzer");
    ui.add_space(6.0);
    ui.label("Use this app to upload, analyze, and visualize survey data.");
    ui.label("Start on the 'Upload Survey' page, or drop a CSV file onto this window.");
}

pub fn upload_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Upload Your Survey CSV File");
    ui.add_space(6.0);

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Choose a CSV file…").clicked() {
            open_file_dialog(state);
        }
        ui.label("or drag and drop one here.");
    });

    if let Some(status) = &state.upload_status {
        status_label(ui, status.severity, &status.text);
    }
    ui.separator();

    if let SessionData::Loaded(loaded) = state.session.data() {
        ui.label(format!("Preview of {}", loaded.source));
        let headers = loaded.dataset.column_names();
        let rows = loaded.dataset.head(state.config.preview_rows);
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            string_table(ui, "preview", &headers, &rows);
        });
    }
}

pub fn analyze_page(ui: &mut Ui, state: &AppState) {
    ui.heading("Survey Data Summary");
    ui.add_space(6.0);

    let (structure, stats) = match (state.session.structural_report(), state.session.describe()) {
        (Ok(structure), Ok(stats)) => (structure, stats),
        (Err(e), _) | (_, Err(e)) => {
            pipeline_error(ui, &e);
            return;
        }
    };

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Basic Info:");
            ui.label(format!(
                "{} entries, {} columns",
                structure.rows,
                structure.column_count()
            ));
            let (headers, rows) = structure_rows(&structure);
            string_table(ui, "structure", &headers, &rows);
            ui.label(dtype_footer(&structure));

            ui.add_space(12.0);
            ui.horizontal(|ui: &mut Ui| {
                ui.strong("Descriptive Stats:");
                if ui.small_button("Copy as JSON").clicked() {
                    copy_reports(ui, &structure, &stats);
                }
            });
            let (headers, rows) = describe_rows(&stats);
            string_table(ui, "describe", &headers, &rows);
        });
}

#[derive(Serialize)]
struct ReportExport<'a> {
    structure: &'a StructuralReport,
    statistics: &'a DescribeReport,
}

fn copy_reports(ui: &mut Ui, structure: &StructuralReport, statistics: &DescribeReport) {
    let export = ReportExport {
        structure,
        statistics,
    };
    match serde_json::to_string_pretty(&export) {
        Ok(text) => ui.ctx().copy_text(text),
        Err(e) => {
            log::error!("Failed to serialize reports: {e}");
            status_label(ui, Severity::Error, "Could not copy reports.");
        }
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Choose a CSV file")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Uploading {}", path.display());
        state.ingest_path(&path);
        state.page = Page::Upload;
    }
}
