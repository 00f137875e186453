use thiserror::Error;

/// Failure to load or validate a [`crate::config::RatingConfig`] document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Failure to build a [`crate::models::RouteProfile`] from a track file.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("GPX parsing error: {0}")]
    GpxParsing(String),

    #[error("No track points found in GPX file")]
    NoTrackPoints,
}
