//! Per-endpoint aggregation policy.

use crate::dispatch::error::DispatchError;
use crate::registry::HandlerError;

/// How a dispatcher reacts to a failing handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationPolicy {
    /// The first handler error aborts the request; collected results are dropped.
    FailFast,
    /// Failing handlers contribute nothing; the rest of the response is kept.
    BestEffort,
}

impl AggregationPolicy {
    /// Fold one handler's outcome into `results`.
    ///
    /// Under [`AggregationPolicy::FailFast`] an error is returned and the
    /// caller must discard `results`.
    pub fn absorb<T>(
        self,
        results: &mut Vec<T>,
        handler: &str,
        outcome: Result<Vec<T>, HandlerError>,
    ) -> Result<(), DispatchError> {
        match outcome {
            Ok(mut items) => {
                results.append(&mut items);
                Ok(())
            }
            Err(source) => match self {
                AggregationPolicy::FailFast => Err(DispatchError::Handler {
                    handler: handler.to_string(),
                    source,
                }),
                AggregationPolicy::BestEffort => {
                    tracing::warn!(handler = %handler, error = %source, "Skipping failed handler");
                    Ok(())
                }
            },
        }
    }
}
