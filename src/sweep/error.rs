use std::path::PathBuf;

use crate::reader::ReadError;

/// Errors that can occur while interpreting a sweep log
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// The file could not be decoded in any read mode
    #[error("Could not open file {}: {source}", .path.display())]
    FileRead {
        /// File that failed to open
        path: PathBuf,
        /// Error of the last read mode attempted
        #[source]
        source: ReadError,
    },

    /// Decoded arrays do not form a supported sweep
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// No output or computed channel has this title
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// Two channels combined element-wise differ in shape
    #[error("Shape mismatch: {left} has shape {left_shape:?}, {right} has shape {right_shape:?}")]
    ShapeMismatch {
        /// Title of the first channel
        left: String,
        /// Shape of the first channel
        left_shape: Vec<usize>,
        /// Title of the second channel
        right: String,
        /// Shape of the second channel
        right_shape: Vec<usize>,
    },

    /// The operation is not defined for this sweep dimension
    #[error("{operation} is not available for {dim}-D data")]
    UnsupportedDimension {
        /// Rejected operation
        operation: String,
        /// Dimension of the data
        dim: usize,
    },

    /// A numeric parameter is out of its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// An axis has no defined coordinate to locate a point on
    #[error("Axis {0} has no defined coordinate")]
    UndefinedAxis(String),

    /// Array shape conversion error
    #[error("Shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    /// The background loader could not be started
    #[error("Failed to start loader worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// The background loader stopped without reporting a result
    #[error("Loader worker for {} exited without a result", .0.display())]
    WorkerDisconnected(PathBuf),
}
