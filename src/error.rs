use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParetoError {
    /// Every record was rejected by the point filter. Recoverable: the caller
    /// reports it and stops without extracting or rendering.
    #[error("no valid data points (x = '{x_column}', y = '{y_column}')")]
    NoValidData { x_column: String, y_column: String },

    #[error("unsupported table format: .{0}")]
    UnsupportedFormat(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("CSV error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl ParetoError {
    /// Whether this is the "nothing to plot" condition rather than a failure.
    pub fn is_no_valid_data(&self) -> bool {
        matches!(self, ParetoError::NoValidData { .. })
    }
}
