use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid photo pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("cannot read {path}: {source}")]
    PhotoDir { path: PathBuf, source: io::Error },

    #[error("no photos match {0}")]
    NoMatch(String),

    #[error("wildcards are only supported in the file name: {0}")]
    WildcardDirectory(String),

    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("submit failed: {0}")]
    Submit(String),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
