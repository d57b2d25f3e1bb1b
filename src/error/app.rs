use thiserror::Error;

use super::{ConfigError, HttpError, MetricsError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("HTTP client error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Exit status for errors caught before any request was sent.
const CONFIG_EXIT_CODE: u8 = 2;
const FAILURE_EXIT_CODE: u8 = 1;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    /// Returns true for errors that are detected before a run starts.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::Config(_)
                | AppError::Http(HttpError::ReadBodyFile { .. })
        )
    }

    /// Process exit status: `2` for configuration errors, `1` for everything else.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_configuration() {
            CONFIG_EXIT_CODE
        } else {
            FAILURE_EXIT_CODE
        }
    }
}
