//! Error types for the fantasy league history service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("No league history found for league_id {league_id}")]
    EmptyHistory { league_id: u32 },

    #[error("Multiple history records share the earliest season {season_id}")]
    AmbiguousSeason { season_id: u16 },

    #[error("Malformed league history payload: {message}")]
    MalformedPayload { message: String },

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<rusqlite::Error> for HistoryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                HistoryError::ConstraintViolation {
                    message: message.clone().unwrap_or_else(|| err.to_string()),
                }
            }
            _ => HistoryError::Database(err),
        }
    }
}

impl HistoryError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        HistoryError::MalformedPayload {
            message: message.into(),
        }
    }
}
