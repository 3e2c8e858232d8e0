use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform response body for every dispatcher-level operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub timestamp: i64,
}

impl Envelope {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            code: None,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn error(message: impl Into<String>, code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            code: Some(code),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// 200 on success, otherwise the envelope code (400 when absent or not a valid status).
    pub fn status_code(&self) -> StatusCode {
        if self.success {
            return StatusCode::OK;
        }
        self.code
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::BAD_REQUEST)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
