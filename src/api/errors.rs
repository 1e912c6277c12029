//! API Error Handling
//!
//! Structured error responses with proper HTTP status codes and request tracking.

use crate::errors::WagerRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level API error response with request tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub error: ErrorBody,
}

/// Error body with structured information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code (BAD_REQUEST, INVALID_AMOUNT, INSUFFICIENT_FUNDS, ...)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (can be any JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error types with request tracking
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub request_id: String,
}

#[derive(Debug)]
pub enum ApiErrorKind {
    /// Malformed payload; never reaches the engine
    BadRequest(String),
    /// The engine refused the wager
    Rejected(WagerRejection),
}

impl ApiError {
    pub fn bad_request(request_id: String, message: String) -> Self {
        Self {
            kind: ApiErrorKind::BadRequest(message),
            request_id,
        }
    }

    pub fn rejected(request_id: String, rejection: WagerRejection) -> Self {
        Self {
            kind: ApiErrorKind::Rejected(rejection),
            request_id,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ApiErrorKind::BadRequest(msg) => write!(f, "[{}] Bad Request: {}", self.request_id, msg),
            ApiErrorKind::Rejected(rejection) => write!(f, "[{}] Rejected: {}", self.request_id, rejection),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self.kind {
            ApiErrorKind::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            ApiErrorKind::Rejected(rejection) => {
                let details = match rejection {
                    WagerRejection::InsufficientFunds { balance, amount } => {
                        Some(serde_json::json!({ "balance": balance, "amount": amount }))
                    }
                    WagerRejection::InvalidAmount => None,
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    rejection.code(),
                    rejection.to_string(),
                    details,
                )
            }
        };

        let body = Json(ErrorResponse {
            request_id: self.request_id.clone(),
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        });

        (status, body).into_response()
    }
}
