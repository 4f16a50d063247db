// src/errors.rs

use thiserror::Error;

pub type LoggyResult<T> = Result<T, LoggyError>;

/// Failures of the service's bootstrap path and its store.
#[derive(Debug, Error)]
pub enum LoggyError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl LoggyError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        LoggyError::Config(msg.into())
    }
}
