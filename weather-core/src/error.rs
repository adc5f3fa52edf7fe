//! Error types for outbound calls and for the response boundary.

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Failure of a single outbound provider call.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err)
        }
    }
}

/// A handled weather lookup failure.
///
/// Serializes to the response body the caller receives in place of a report:
/// `{"error": ..., "message": ...}` or, for a malformed upstream payload,
/// `{"error": "Invalid API response", "response": <body>}`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Weather API error: {0}")]
    UpstreamStatus(u16),

    #[error("Invalid API response")]
    InvalidResponse(Value),

    #[error("Request timeout")]
    Timeout,

    #[error("Server error")]
    Server(String),
}

impl LookupError {
    pub fn server(detail: impl std::fmt::Display) -> Self {
        LookupError::Server(detail.to_string())
    }

    pub fn message(&self) -> Option<String> {
        match self {
            LookupError::UpstreamStatus(_) => {
                Some("Failed to fetch weather data from Open-Meteo".to_string())
            }
            LookupError::InvalidResponse(_) => None,
            LookupError::Timeout => {
                Some("The weather service took too long to respond".to_string())
            }
            LookupError::Server(detail) => Some(format!("An error occurred: {detail}")),
        }
    }
}

impl From<FetchError> for LookupError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => LookupError::Timeout,
            FetchError::Status(status) => LookupError::UpstreamStatus(status),
            other => LookupError::server(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<&'a Value>,
}

impl Serialize for LookupError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let response = match self {
            LookupError::InvalidResponse(body) => Some(body),
            _ => None,
        };

        ErrorBody {
            error: self.to_string(),
            message: self.message(),
            response,
        }
        .serialize(serializer)
    }
}
