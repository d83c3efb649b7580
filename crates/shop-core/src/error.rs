use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Uniform error body returned by every service.
///
/// Wire format: `{"kind", "message", "status", "timestamp"}` where `status`
/// repeats the numeric HTTP status and `timestamp` is RFC 3339 UTC.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub kind: &'static str,
    pub message: String,
    pub status: u16,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: status.as_u16(),
            timestamp: Utc::now(),
        }
    }

    pub fn bad_request(kind: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, kind, message)
    }

    pub fn conflict(kind: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, kind, message)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        (self.status_code(), axum::Json(self)).into_response()
    }
}

/// Marker used for domain failures: `#### <message>! ####`.
pub fn hash_marked(message: &str) -> String {
    format!("#### {message}! ####")
}

/// Marker used for request validation failures: `*<message>!**`.
pub fn star_marked(message: &str) -> String {
    format!("*{message}!**")
}
