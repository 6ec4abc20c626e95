use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockpileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Corrupt data in {}: {source}", path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: Box<StockpileError>,
    },

    #[error("Unit of work has been disposed")]
    Disposed,

    #[error("Config error: {0}")]
    Config(String),
}

impl From<confique::Error> for StockpileError {
    fn from(err: confique::Error) -> Self {
        StockpileError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StockpileError>;
