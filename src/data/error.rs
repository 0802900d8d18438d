use std::path::PathBuf;

use thiserror::Error;

/// Reasons a catalog file could not be turned into a [`Dataset`](super::model::Dataset).
///
/// Every variant is fatal for the load: no partial dataset is ever returned.
/// Unparsable dates are not errors and never reach this type.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Required columns absent from the header / schema.
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed input: {0}")]
    Malformed(String),
}

impl LoadError {
    /// Classify an I/O failure on `path`, separating "does not exist".
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
