//! Request body extraction with length validation

use crate::error::TextLensError;
use crate::types::{AnalysisRequest, ValidationIssue};
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::Value;

/// A `{ "text": string }` body that passed validation
///
/// Rejects with a 400 before the handler (and therefore any analyzer) runs, or
/// with a 413 when the body exceeds the default body limit.
#[derive(Debug)]
pub struct ValidatedText(pub AnalysisRequest);

#[async_trait]
impl<S> FromRequest<S> for ValidatedText
where
    S: Send + Sync,
{
    type Rejection = TextLensError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    TextLensError::PayloadTooLarge(rejection.body_text())
                } else {
                    TextLensError::Validation(vec![ValidationIssue::invalid_json(
                        rejection.body_text(),
                    )])
                }
            })?;

        AnalysisRequest::from_json(&body).map(Self)
    }
}
