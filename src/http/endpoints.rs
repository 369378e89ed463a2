//! Axum handlers for the five protocol endpoints.
//!
//! Each handler builds the request context, then lets the envelope decode
//! the body and run the matching dispatcher.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::dispatch;
use crate::http::envelope::{self, NoParams};
use crate::http::server::AppState;
use crate::model::{AnnotationRequest, QueryRequest, TagValuesRequest};
use crate::registry::RequestContext;

/// Header carrying the correlation id set by the request id layer.
pub const X_REQUEST_ID: &str = "x-request-id";

fn request_context(headers: &HeaderMap) -> RequestContext {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(RequestContext::new)
        .unwrap_or_default()
}

/// `GET /`: connection test used by the dashboard when the data source is saved.
pub async fn root() -> StatusCode {
    StatusCode::OK
}

/// `GET|POST /search`: every target name, sorted.
pub async fn search(State(state): State<AppState>) -> Response {
    envelope::respond(&dispatch::discover(&state.registry))
}

/// `POST /query`
pub async fn query(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let ctx = request_context(&headers);
    let registry = state.registry.clone();

    envelope::process(&body, move |request: QueryRequest| async move {
        tracing::debug!(
            request_id = %ctx.request_id(),
            targets = request.targets.len(),
            "Dispatching query"
        );
        dispatch::query(&registry, &ctx, &request).await
    })
    .await
}

/// `POST /annotations`
pub async fn annotations(State(state): State<AppState>, body: Bytes) -> Response {
    let registry = state.registry.clone();

    envelope::process(&body, move |request: AnnotationRequest| async move {
        dispatch::annotations(&registry, &request).await
    })
    .await
}

/// `OPTIONS /annotations`: CORS preflight. Touches no handler.
pub async fn annotations_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "accept, content-type"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
    )
}

/// `POST /tag-keys`
pub async fn tag_keys(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let ctx = request_context(&headers);
    let registry = state.registry.clone();

    envelope::process(&body, move |_: NoParams| async move {
        dispatch::tag_keys(&registry, &ctx).await
    })
    .await
}

/// `POST /tag-values`
pub async fn tag_values(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = request_context(&headers);
    let registry = state.registry.clone();

    envelope::process(&body, move |request: TagValuesRequest| async move {
        dispatch::tag_values(&registry, &ctx, &request.key).await
    })
    .await
}
