use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
