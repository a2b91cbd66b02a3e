use thiserror::Error;

/// Failures of a whole document translation.
///
/// Per-node problems (backend errors, undecodable images) never surface here;
/// they are logged and the node degrades.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input is not a WordprocessingML package
    #[error("unsupported file kind: {0}")]
    UnsupportedFileKind(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
