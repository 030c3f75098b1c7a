use http::StatusCode;
use std::error::Error;
use std::fmt;

/// Custom Error and Result types to unify errors from all sources.
pub type ProxyResult<T> = Result<T, ProxyError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ProxyError {
    Upstream(String),
    InvalidCategory(String),
    InvalidDate(String),
    Config(String),
    Io(String),
}

impl ProxyError {
    /// Status code surfaced to HTTP callers when this error ends a request.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidCategory(_) | ProxyError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProxyError::Upstream(s) => write!(f, "Upstream Error: {}", s),
            ProxyError::InvalidCategory(s) => write!(f, "Invalid category: {}", s),
            ProxyError::InvalidDate(s) => write!(f, "Invalid date: {}", s),
            ProxyError::Config(s) => write!(f, "Config Error: {}", s),
            ProxyError::Io(s) => write!(f, "IO Error: {}", s),
        }
    }
}

impl Error for ProxyError {}

impl From<reqwest::Error> for ProxyError {
    fn from(error: reqwest::Error) -> Self {
        ProxyError::Upstream(error.to_string())
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(error: serde_json::Error) -> Self {
        ProxyError::Upstream(format!("undecodable payload. {error}"))
    }
}

impl From<figment::Error> for ProxyError {
    fn from(error: figment::Error) -> Self {
        ProxyError::Config(error.to_string())
    }
}

impl From<std::io::Error> for ProxyError {
    fn from(error: std::io::Error) -> Self {
        ProxyError::Io(error.to_string())
    }
}
