use thiserror::Error;

/// Errors surfaced by building a relaxation or reading and writing its data.
///
/// Numerical trouble during a pass (degenerate triangles, cells without a center, unmatched vertices) is not an error:
/// it is logged and the affected point is left where it is.
#[derive(Debug, Error)]
pub enum LloydError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("point set is empty")]
    EmptyPointSet,

    #[error("malformed point list at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LloydError>;
