use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("source file not found: {0}")]
    SourceNotFound(std::path::PathBuf),

    #[error("missing required column: `{0}`")]
    MissingColumn(&'static str),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
