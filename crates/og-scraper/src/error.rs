//! Error types for the Open Graph scraping service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

use crate::fetch::FetchError;

/// Application code attached to every error response body
pub const ERROR_CODE: i32 = -20000;

/// Errors surfaced at the request-handler boundary
///
/// All variants collapse to the same externally-visible shape: HTTP 400
/// with `{"code": -20000, "message": ...}`. Callers get the root cause
/// text but no finer diagnosis.
#[derive(Debug)]
pub enum AppError {
    /// Malformed percent-encoding in the url query parameter
    Decode(String),
    /// The outbound GET for the target page failed
    Fetch(FetchError),
    #[allow(dead_code)]
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Decode(msg) => write!(f, "{}", msg),
            AppError::Fetch(err) => write!(f, "{}", err),
            AppError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Fetch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Fetch(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::warn!(error = %message, "Request failed");
        (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "code": ERROR_CODE, "message": message })),
        )
            .into_response()
    }
}

/// Errors that can occur during service startup
#[derive(Debug)]
pub enum ScraperError {
    Config(String),
    Io(Box<std::io::Error>),
}

impl fmt::Display for ScraperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScraperError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ScraperError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ScraperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScraperError::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScraperError {
    fn from(err: std::io::Error) -> Self {
        ScraperError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ScraperError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ScraperError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
