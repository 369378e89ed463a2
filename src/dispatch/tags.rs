//! Tag key and tag value dispatch.
//!
//! Tag keys are infallible and simply concatenated. Tag values fail fast:
//! a partial value list would look like a complete one to the dashboard.

use crate::dispatch::error::DispatchError;
use crate::dispatch::policy::AggregationPolicy;
use crate::model::{TagKey, TagValue};
use crate::registry::{Registry, RequestContext};

pub const TAG_KEYS_POLICY: AggregationPolicy = AggregationPolicy::BestEffort;
pub const TAG_VALUES_POLICY: AggregationPolicy = AggregationPolicy::FailFast;

/// Concatenate the tag keys of every capable handler.
pub async fn tag_keys(
    registry: &Registry,
    ctx: &RequestContext,
) -> Result<Vec<TagKey>, DispatchError> {
    let mut keys = Vec::new();

    for (handler, source) in registry.tag_key_sources() {
        let found = source.tag_keys(ctx).await;
        TAG_KEYS_POLICY.absorb(
            &mut keys,
            handler,
            Ok(found.into_iter().map(TagKey::new).collect()),
        )?;
    }

    Ok(keys)
}

/// Concatenate the values for `key`; the first handler error aborts.
pub async fn tag_values(
    registry: &Registry,
    ctx: &RequestContext,
    key: &str,
) -> Result<Vec<TagValue>, DispatchError> {
    let mut values = Vec::new();

    for (handler, source) in registry.tag_value_sources() {
        let outcome = source
            .tag_values(ctx, key)
            .await
            .map(|found| found.into_iter().map(TagValue::new).collect());
        if let Err(err) = TAG_VALUES_POLICY.absorb(&mut values, handler, outcome) {
            tracing::warn!(request_id = %ctx.request_id(), key = %key, error = %err, "Tag value lookup failed");
            return Err(err);
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::fixtures::FakeHandler;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_tag_keys_concatenated_in_order() {
        let registry = Registry::builder()
            .register("a", FakeHandler::tag_keys(&["host", "region"]))
            .register("plain", FakeHandler::series(&[1.0]))
            .register("b", FakeHandler::tag_keys(&["app"]))
            .build();

        let keys = tag_keys(&registry, &RequestContext::default()).await.unwrap();

        assert_eq!(
            keys,
            vec![TagKey::new("host"), TagKey::new("region"), TagKey::new("app")]
        );
    }

    #[tokio::test]
    async fn test_tag_values_concatenated_in_order() {
        let registry = Registry::builder()
            .register("a", FakeHandler::tag_values(&["web-1"]))
            .register("b", FakeHandler::tag_values(&["web-2", "web-3"]))
            .build();

        let values = tag_values(&registry, &RequestContext::default(), "host")
            .await
            .unwrap();

        assert_eq!(
            values,
            vec![TagValue::new("web-1"), TagValue::new("web-2"), TagValue::new("web-3")]
        );
    }

    #[tokio::test]
    async fn test_tag_values_error_aborts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = Registry::builder()
            .register("a", FakeHandler::tag_values(&["web-1"]).counting(&calls))
            .register("broken", FakeHandler::failing_tag_values().counting(&calls))
            .register("c", FakeHandler::tag_values(&["web-3"]).counting(&calls))
            .build();

        let err = tag_values(&registry, &RequestContext::default(), "host")
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Handler { ref handler, .. } if handler == "broken"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_capable_handlers() {
        let registry = Registry::builder()
            .register("plain", FakeHandler::series(&[1.0]))
            .build();
        let ctx = RequestContext::default();

        assert!(tag_keys(&registry, &ctx).await.unwrap().is_empty());
        assert!(tag_values(&registry, &ctx, "host").await.unwrap().is_empty());
    }
}
