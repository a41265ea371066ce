pub mod panels;
pub mod plot;
pub mod tables;

use eframe::egui::{Color32, RichText, Ui};

use crate::error::{PipelineError, Severity};

pub fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Success => Color32::from_rgb(40, 160, 60),
        Severity::Warning => Color32::from_rgb(210, 150, 0),
        Severity::Error => Color32::RED,
    }
}

pub fn status_label(ui: &mut Ui, severity: Severity, text: &str) {
    ui.label(RichText::new(text).color(severity_color(severity)));
}

/// Show a pipeline error in place of the page content.
pub fn pipeline_error(ui: &mut Ui, err: &PipelineError) {
    log::debug!("Page short-circuited: {err}");
    status_label(ui, err.severity(), &err.to_string());
}
