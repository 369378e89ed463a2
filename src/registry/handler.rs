//! Handler abstraction.
//!
//! A handler is a data source adapter. It exposes any subset of four
//! capabilities; each one is a separate trait so a handler only implements
//! what it supports and reports it through the matching accessor.

use async_trait::async_trait;

use crate::model::{Annotation, AnnotationRequest, QueryArgs, QueryResponse, Target};
use crate::registry::context::RequestContext;

/// Error returned by handler capabilities.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A registered data source.
///
/// Every accessor defaults to `None`. A handler implementing, say,
/// [`QuerySource`] overrides [`Handler::query`] to return `Some(self)`.
pub trait Handler: Send + Sync {
    fn query(&self) -> Option<&dyn QuerySource> {
        None
    }

    fn annotations(&self) -> Option<&dyn AnnotationSource> {
        None
    }

    fn tag_keys(&self) -> Option<&dyn TagKeySource> {
        None
    }

    fn tag_values(&self) -> Option<&dyn TagValueSource> {
        None
    }
}

/// Answers query targets owned by the handler.
#[async_trait]
pub trait QuerySource: Send + Sync {
    /// Produce the series or table for `target`.
    ///
    /// `target.kind` says which shape the dashboard asked for.
    async fn query(
        &self,
        ctx: &RequestContext,
        target: &Target,
        args: &QueryArgs,
    ) -> Result<QueryResponse, HandlerError>;
}

/// Produces annotations for a dashboard annotation query.
#[async_trait]
pub trait AnnotationSource: Send + Sync {
    async fn annotations(
        &self,
        request: &AnnotationRequest,
    ) -> Result<Vec<Annotation>, HandlerError>;
}

/// Lists tag keys usable in ad-hoc filters. Infallible by contract.
#[async_trait]
pub trait TagKeySource: Send + Sync {
    async fn tag_keys(&self, ctx: &RequestContext) -> Vec<String>;
}

/// Lists the values available for a tag key.
#[async_trait]
pub trait TagValueSource: Send + Sync {
    async fn tag_values(&self, ctx: &RequestContext, key: &str)
        -> Result<Vec<String>, HandlerError>;
}
