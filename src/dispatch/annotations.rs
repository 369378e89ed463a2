//! Annotation dispatch.
//!
//! Annotations are overlay data, so a failing handler is skipped rather
//! than blanking the markers every other handler produced.

use crate::dispatch::error::DispatchError;
use crate::dispatch::policy::AggregationPolicy;
use crate::model::{Annotation, AnnotationRequest};
use crate::registry::Registry;

pub const POLICY: AggregationPolicy = AggregationPolicy::BestEffort;

/// Collect annotations from every capable handler, in registration order.
///
/// Every result carries the caller's descriptor in `request`.
pub async fn annotations(
    registry: &Registry,
    request: &AnnotationRequest,
) -> Result<Vec<Annotation>, DispatchError> {
    let mut collected = Vec::new();

    for (handler, source) in registry.annotation_sources() {
        let outcome = source.annotations(request).await;
        POLICY.absorb(&mut collected, handler, outcome)?;
    }

    for annotation in &mut collected {
        annotation.request = request.annotation.clone();
    }

    Ok(collected)
}
