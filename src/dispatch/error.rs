//! Processing errors raised by dispatchers.

use thiserror::Error;

use crate::registry::HandlerError;

/// Failure of a fail-fast dispatcher. Reported to the caller as a 500.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered handler owns the target.
    #[error("no handler for target {0:?}")]
    UnknownTarget(String),

    /// A handler failed while producing its share of the response.
    #[error("{handler}: {source}")]
    Handler {
        handler: String,
        #[source]
        source: HandlerError,
    },
}
