//! Query dispatch.
//!
//! Each target is answered by the handler registered under the target's
//! name. Any unresolved target or handler error fails the whole request.

use crate::dispatch::error::DispatchError;
use crate::dispatch::policy::AggregationPolicy;
use crate::model::{QueryRequest, QueryResponse};
use crate::registry::{Registry, RequestContext};

pub const POLICY: AggregationPolicy = AggregationPolicy::FailFast;

/// Resolve every target in request order.
pub async fn query(
    registry: &Registry,
    ctx: &RequestContext,
    request: &QueryRequest,
) -> Result<Vec<QueryResponse>, DispatchError> {
    let mut responses = Vec::with_capacity(request.targets.len());

    for target in &request.targets {
        let Some((handler, source)) = registry.query_source(&target.target) else {
            tracing::warn!(request_id = %ctx.request_id(), target = %target.target, "No handler for target");
            return Err(DispatchError::UnknownTarget(target.target.clone()));
        };

        tracing::debug!(
            request_id = %ctx.request_id(),
            target = %target.target,
            kind = target.kind.as_str(),
            "Querying handler"
        );
        let outcome = source
            .query(ctx, target, &request.args)
            .await
            .map(|response| vec![response]);
        POLICY.absorb(&mut responses, handler, outcome)?;
    }

    Ok(responses)
}
