use thiserror::Error;

#[derive(Debug, Error)]
pub enum KaleidoError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KaleidoError>;
