//! Request-scoped context handed to handler capabilities.

use uuid::Uuid;

/// Per-request information available to handlers.
///
/// Dropping the request future (client disconnect, request timeout) is the
/// only cancellation signal; handlers that spawn work of their own should
/// tie it to the future they return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Correlation id, taken from the `x-request-id` header.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }
}
