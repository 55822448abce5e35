use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmartFarmError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),
}

impl From<::config::ConfigError> for SmartFarmError {
    fn from(e: ::config::ConfigError) -> Self {
        SmartFarmError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SmartFarmError>;
