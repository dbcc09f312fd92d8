// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the relay endpoint.
//!
//! One route serves every method: `OPTIONS` (preflight), `GET` (liveness),
//! `POST` (submit), anything else 405.

use std::any::Any;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use courier_relay::{RelayError, Submission};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{error, warn};

use crate::server::GatewayState;

/// Body of a POST to the relay endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBody {
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Data-URI images. `null` is treated as no photos.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub photos: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<SubmitBody> for Submission {
    fn from(body: SubmitBody) -> Self {
        Self {
            sender_name: body.sender_name,
            message: body.message,
            photos: body.photos,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub message_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message_id: None,
            timestamp: None,
        }
    }

    fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    fn stamped(mut self) -> Self {
        self.timestamp = Some(now_rfc3339());
        self
    }

    fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2026-03-09T17:05:04.123Z`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `OPTIONS`: empty 200. The CORS layer adds the allow headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// `GET`: liveness.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Courier relay is running",
        timestamp: now_rfc3339(),
    })
}

/// Any method without a handler.
pub async fn method_not_allowed() -> Response {
    ErrorResponse::new("Method not allowed. Use POST.").into_response_with(StatusCode::METHOD_NOT_ALLOWED)
}

/// `POST`: run one submission through the relay.
pub async fn submit(
    State(state): State<GatewayState>,
    payload: Result<Json<SubmitBody>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                StatusCode::PAYLOAD_TOO_LARGE
            } else {
                StatusCode::BAD_REQUEST
            };
            warn!(status = %status, reason = %rejection.body_text(), "rejected request body");
            return ErrorResponse::new(format!("Invalid request body: {}", rejection.body_text()))
                .into_response_with(status);
        }
    };

    match state.relay.submit(body.into()).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(SubmitResponse {
                success: true,
                message: "Message delivered to Telegram".to_string(),
                message_id: receipt.record_id.to_string(),
                timestamp: now_rfc3339(),
            }),
        )
            .into_response(),
        Err(err) => relay_error_response(err),
    }
}

fn relay_error_response(err: RelayError) -> Response {
    match err {
        RelayError::Validation(message) => {
            ErrorResponse::new(message).into_response_with(StatusCode::BAD_REQUEST)
        }
        RelayError::NotConfigured(_) => {
            ErrorResponse::new(err.to_string()).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
        RelayError::Persistence(_) => ErrorResponse::new("Server error: Failed to save message")
            .stamped()
            .into_response_with(StatusCode::INTERNAL_SERVER_ERROR),
        RelayError::Delivery { record_id, message } => {
            ErrorResponse::new(format!("Failed to send to Telegram: {message}"))
                .with_message_id(record_id.to_string())
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Response for a panic caught by `CatchPanicLayer`.
///
/// The panic payload is logged, never returned.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = %detail, "request handler panicked");

    ErrorResponse::new("Server error: unexpected failure")
        .stamped()
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_accepts_camel_case_and_null_photos() {
        let body: SubmitBody =
            serde_json::from_str(r#"{"senderName":"Ana","message":"Hi","photos":null}"#).unwrap();
        assert_eq!(body.sender_name.as_deref(), Some("Ana"));
        assert!(body.photos.is_empty());
    }

    #[test]
    fn body_fields_are_optional() {
        let body: SubmitBody = serde_json::from_str("{}").unwrap();
        assert!(body.sender_name.is_none());
        assert!(body.message.is_none());
    }

    #[test]
    fn error_response_omits_absent_fields() {
        let json = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "nope"}));
    }

    #[test]
    fn timestamps_are_utc_millis() {
        let ts = now_rfc3339();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
