use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkycastError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Weather service unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Geolocation unavailable: {0}")]
    Geolocation(String),
}

pub type Result<T> = std::result::Result<T, SkycastError>;
