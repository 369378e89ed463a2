//! Decode → process → encode pipeline shared by every endpoint.
//!
//! # Responsibilities
//! - Decode a non-empty body into the endpoint's request type
//! - Run the endpoint's processor
//! - Encode the result list as a JSON array
//! - Map failures to status codes and plain-text bodies
//!
//! # Design Decisions
//! - An empty or `null` body is not an error: the processor gets
//!   `Default::default()`
//! - The response is encoded into a buffer before anything is written, so
//!   a failed encoding never leaves a partial body behind
//! - Exactly one of {error body, success body} is produced

use std::future::Future;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::dispatch::DispatchError;

/// Content type of every successful response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Failure at any stage of the pipeline.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Malformed request body. Client fault.
    #[error("failed to parse request: {0}")]
    Decode(#[source] serde_json::Error),

    /// The dispatcher reported an error.
    #[error("failed to process request: {0}")]
    Process(#[source] DispatchError),

    /// The results could not be serialized.
    #[error("failed to create response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl EnvelopeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EnvelopeError::Decode(_) => StatusCode::BAD_REQUEST,
            EnvelopeError::Process(_) | EnvelopeError::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for EnvelopeError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Request type for endpoints that take no parameters.
///
/// Any well-formed JSON body is accepted and ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoParams;

impl<'de> Deserialize<'de> for NoParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NoParams)
    }
}

/// Decode `body`, or produce the zero value when it is empty or `null`.
pub fn decode<Req>(body: &[u8]) -> Result<Req, EnvelopeError>
where
    Req: DeserializeOwned + Default,
{
    if body.is_empty() {
        return Ok(Req::default());
    }
    let request: Option<Req> = serde_json::from_slice(body).map_err(EnvelopeError::Decode)?;
    Ok(request.unwrap_or_default())
}

/// Encode a result list. An empty list encodes as `[]`.
pub fn encode<T: Serialize>(results: &[T]) -> Result<Vec<u8>, EnvelopeError> {
    serde_json::to_vec(results).map_err(EnvelopeError::Encode)
}

/// Run the pipeline and return the encoded body.
pub async fn evaluate<Req, T, F, Fut>(body: &[u8], processor: F) -> Result<Vec<u8>, EnvelopeError>
where
    Req: DeserializeOwned + Default,
    T: Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Vec<T>, DispatchError>>,
{
    let request = decode::<Req>(body)?;
    let results = processor(request).await.map_err(EnvelopeError::Process)?;
    encode(&results)
}

/// Run the pipeline and turn the outcome into an HTTP response.
pub async fn process<Req, T, F, Fut>(body: &[u8], processor: F) -> Response
where
    Req: DeserializeOwned + Default,
    T: Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Vec<T>, DispatchError>>,
{
    match evaluate(body, processor).await {
        Ok(encoded) => json_response(encoded),
        Err(err) => {
            tracing::warn!(status = %err.status_code(), error = %err, "Request failed");
            err.into_response()
        }
    }
}

/// Encode `results` directly, for endpoints with nothing to decode.
pub fn respond<T: Serialize>(results: &[T]) -> Response {
    match encode(results) {
        Ok(encoded) => json_response(encoded),
        Err(err) => {
            tracing::error!(error = %err, "Failed to encode response");
            err.into_response()
        }
    }
}

fn json_response(encoded: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        encoded,
    )
        .into_response()
}
