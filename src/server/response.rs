use crate::{error::ProxyError, storage::CacheEntry};
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Serialize;

/// Payload served to clients. Live and fresh cached data carry no marker,
/// degraded answers say where they come from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Served<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_cache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
}

impl<T> Served<T> {
    pub fn live(data: T) -> Self {
        Served {
            data,
            from_cache: None,
            cached_at: None,
            mock: None,
        }
    }

    pub fn stale(entry: CacheEntry<T>) -> Self {
        Served {
            data: entry.data,
            from_cache: Some(true),
            cached_at: Some(entry.cached_at.to_rfc3339()),
            mock: None,
        }
    }

    pub fn mock(data: T) -> Self {
        Served {
            mock: Some(true),
            ..Served::live(data)
        }
    }
}

impl<T: Serialize> IntoResponse for Served<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Error answer: a short label and, when there is one, the triggering message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        ApiError {
            status,
            error: error.into(),
            message,
        }
    }
}

impl From<ProxyError> for ApiError {
    fn from(error: ProxyError) -> Self {
        let label = match &error {
            ProxyError::InvalidCategory(_) => "Invalid category",
            ProxyError::InvalidDate(_) => "Invalid date",
            ProxyError::Upstream(_) => "Upstream error",
            ProxyError::Config(_) | ProxyError::Io(_) => "Server error",
        };
        ApiError::new(error.status_code(), label, Some(error.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Clone, Serialize)]
    struct Payload {
        title: &'static str,
    }

    #[test]
    fn live_payload_has_no_markers() {
        let served = Served::live(Payload { title: "Hits" });
        assert_eq!(serde_json::to_value(&served).unwrap(), json!({ "title": "Hits" }));
    }

    #[test]
    fn mock_payload_is_flagged() {
        let served = Served::mock(Payload { title: "Hits" });
        assert_eq!(
            serde_json::to_value(&served).unwrap(),
            json!({ "title": "Hits", "mock": true })
        );
    }

    #[test]
    fn invalid_category_is_a_bad_request() {
        let error = ApiError::from(ProxyError::InvalidCategory("'walks'".to_string()));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.error, "Invalid category");
        assert_eq!(error.message.as_deref(), Some("Invalid category: 'walks'"));
    }
}
