use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Failures produced by the session data pipeline.
///
/// None of these are fatal: the UI turns each one into a status line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The uploaded bytes are not a usable CSV table.
    #[error("could not parse CSV: {0}")]
    Parse(String),

    /// A dataset is required but nothing has been uploaded yet.
    #[error("Please upload a file first on the 'Upload Survey' page.")]
    NoData,

    /// The requested column does not exist in the current dataset.
    #[error("column '{0}' does not exist in the current dataset")]
    InvalidColumn(String),
}

/// How a message should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl PipelineError {
    pub fn severity(&self) -> Severity {
        match self {
            PipelineError::NoData => Severity::Warning,
            PipelineError::Parse(_) | PipelineError::InvalidColumn(_) => Severity::Error,
        }
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Parse(err.to_string())
    }
}
