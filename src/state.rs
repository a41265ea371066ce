use std::path::Path;

use crate::config::AppConfig;
use crate::data::chart::ChartKind;
use crate::data::session::Session;
use crate::error::{PipelineError, Severity};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Upload,
    Analyze,
    Charts,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Upload, Page::Analyze, Page::Charts];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Upload => "Upload Survey",
            Page::Analyze => "Analyze Data",
            Page::Charts => "Generate Charts",
        }
    }
}

/// A user-facing status line.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    pub config: AppConfig,

    /// The per-session dataset store.
    pub session: Session,

    pub page: Page,

    /// Column picked on the charts page (transient).
    pub chart_column: Option<String>,
    pub chart_kind: ChartKind,

    /// Result of the most recent upload attempt.
    pub upload_status: Option<StatusMessage>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Ingest an upload. On failure the previous dataset stays in place.
    pub fn ingest_bytes(&mut self, source: &str, bytes: &[u8]) {
        let ingested = self
            .session
            .ingest(source, bytes)
            .map(|dataset| dataset.column_names());

        match ingested {
            Ok(columns) => {
                // Keep the chart selection only if it still names a column.
                let keep = self
                    .chart_column
                    .as_ref()
                    .is_some_and(|c| columns.contains(c));
                if !keep {
                    self.chart_column = columns.into_iter().next();
                }
                self.upload_status = Some(StatusMessage {
                    severity: Severity::Success,
                    text: "File uploaded successfully!".to_string(),
                });
            }
            Err(e) => self.report_upload_error(source, &e),
        }
    }

    /// Read the picked file and ingest it.
    pub fn ingest_path(&mut self, path: &Path) {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match crate::data::loader::read_upload(path) {
            Ok(bytes) => self.ingest_bytes(&source, &bytes),
            Err(e) => {
                log::error!("Failed to read upload: {e:#}");
                self.upload_status = Some(StatusMessage {
                    severity: Severity::Error,
                    text: format!("Error: {e:#}"),
                });
            }
        }
    }

    fn report_upload_error(&mut self, source: &str, err: &PipelineError) {
        log::error!("Failed to ingest '{source}': {err}");
        self.upload_status = Some(StatusMessage {
            severity: err.severity(),
            text: format!("Error: {err}"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_upload_selects_first_column() {
        let mut state = AppState::default();
        state.ingest_bytes("s.csv", b"name,age\nA,10\n");
        assert_eq!(state.chart_column.as_deref(), Some("name"));
        assert_eq!(
            state.upload_status.as_ref().map(|s| s.severity),
            Some(Severity::Success)
        );
    }

    #[test]
    fn reupload_keeps_matching_selection() {
        let mut state = AppState::default();
        state.ingest_bytes("a.csv", b"name,age\nA,10\n");
        state.chart_column = Some("age".into());
        state.ingest_bytes("b.csv", b"age,city\n3,X\n");
        assert_eq!(state.chart_column.as_deref(), Some("age"));

        state.ingest_bytes("c.csv", b"city\nY\n");
        assert_eq!(state.chart_column.as_deref(), Some("city"));
    }

    #[test]
    fn failed_upload_reports_error_and_keeps_data() {
        let mut state = AppState::default();
        state.ingest_bytes("a.csv", b"name\nA\n");
        state.ingest_bytes("b.csv", b"");
        let status = state.upload_status.clone().unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert!(status.text.starts_with("Error:"));
        assert!(state.session.is_loaded());
        assert_eq!(state.chart_column.as_deref(), Some("name"));
    }

    #[test]
    fn unreadable_path_is_reported() {
        let mut state = AppState::default();
        state.ingest_path(Path::new("/definitely/not/here.csv"));
        assert_eq!(
            state.upload_status.map(|s| s.severity),
            Some(Severity::Error)
        );
        assert!(!state.session.is_loaded());
    }
}
