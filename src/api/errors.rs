//! Error conversion from TextLensError to HTTP responses
//!
//! Validation failures are reported to the caller with details and oversized
//! bodies get a 413. Every other error is logged in full and answered with a
//! generic 500 body.

use crate::error::TextLensError;
use crate::types::ValidationIssue;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

/// JSON body of an error response
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationIssue>>,
}

impl IntoResponse for TextLensError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            TextLensError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Validation error",
                    details: Some(details),
                },
            ),
            TextLensError::PayloadTooLarge(reason) => {
                debug!("Rejected request body: {}", reason);
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    ErrorBody {
                        error: "Payload too large",
                        details: None,
                    },
                )
            }
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error",
                        details: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
