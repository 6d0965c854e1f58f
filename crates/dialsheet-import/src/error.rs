use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file has no extension: {0}")]
    MissingExtension(PathBuf),
    #[error("invalid file type: {ext}. Allowed: {allowed}")]
    UnsupportedExtension { ext: String, allowed: String },
    #[error("excel support is not enabled in this build")]
    ExcelUnavailable,
    #[error("no input provided")]
    EmptyInput,
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[cfg(feature = "excel")]
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
