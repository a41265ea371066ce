use super::chart::{Chart, ChartKind, build_chart};
use super::loader::parse_csv;
use super::model::Dataset;
use super::summary::{DescribeReport, StructuralReport, describe, structural_report};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Session data store
// ---------------------------------------------------------------------------

/// What the session currently holds.
#[derive(Debug, Clone, Default)]
pub enum SessionData {
    #[default]
    Empty,
    Loaded(LoadedDataset),
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Display name of the upload (usually the file name).
    pub source: String,
    pub dataset: Dataset,
}

/// Holds at most one dataset for the lifetime of a UI session.
///
/// Owned by `AppState`; there is no global instance. Replacing the dataset
/// only ever happens through [`Session::ingest`], which swaps it wholesale.
#[derive(Debug, Default)]
pub struct Session {
    data: SessionData,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.data, SessionData::Loaded(_))
    }

    /// The single guarded accessor for the stored dataset.
    pub fn dataset(&self) -> Result<&Dataset, PipelineError> {
        match &self.data {
            SessionData::Loaded(loaded) => Ok(&loaded.dataset),
            SessionData::Empty => Err(PipelineError::NoData),
        }
    }

    /// Parse `bytes` and, only if that succeeds, replace the stored dataset.
    pub fn ingest(&mut self, source: &str, bytes: &[u8]) -> Result<&Dataset, PipelineError> {
        let dataset = parse_csv(bytes)?;
        log::info!(
            "Ingested '{source}': {} rows x {} columns",
            dataset.row_count(),
            dataset.column_count()
        );
        self.data = SessionData::Loaded(LoadedDataset {
            source: source.to_string(),
            dataset,
        });
        self.dataset()
    }

    pub fn structural_report(&self) -> Result<StructuralReport, PipelineError> {
        self.dataset().map(structural_report)
    }

    pub fn describe(&self) -> Result<DescribeReport, PipelineError> {
        self.dataset().map(describe)
    }

    pub fn visualize(&self, column: &str, kind: ChartKind) -> Result<Chart, PipelineError> {
        build_chart(self.dataset()?, column, kind)
    }
}
