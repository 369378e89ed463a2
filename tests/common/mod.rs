//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use chrono::{DateTime, Duration, TimeZone, Utc};
use simplejson_server::model::{
    Annotation, AnnotationDescriptor, AnnotationRequest, Column, ColumnData, DataPoint, QueryArgs,
    QueryResponse, Table, Target, TimeSeries,
};
use simplejson_server::{
    AnnotationSource, Handler, HandlerError, QuerySource, Registry, RequestContext, ServerConfig,
    SimpleJsonServer, TagKeySource, TagValueSource,
};
use tower::ServiceExt;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

fn minutes(count: usize) -> Vec<DateTime<Utc>> {
    (0..count)
        .map(|i| start() + Duration::minutes(i as i64))
        .collect()
}

/// Time series at fixed epochs, with optional annotation and tag support.
///
/// `calls` counts invocations of every capability.
pub struct SeriesHandler {
    values: Vec<f64>,
    extras: bool,
    failing_extras: bool,
    pub calls: Arc<AtomicUsize>,
}

impl SeriesHandler {
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            extras: false,
            failing_extras: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Also answer annotations, tag keys and tag values.
    pub fn with_extras(mut self) -> Self {
        self.extras = true;
        self
    }

    /// Answer annotations and tag values with errors.
    pub fn with_failing_extras(mut self) -> Self {
        self.extras = true;
        self.failing_extras = true;
        self
    }
}

impl Handler for SeriesHandler {
    fn query(&self) -> Option<&dyn QuerySource> {
        Some(self)
    }

    fn annotations(&self) -> Option<&dyn AnnotationSource> {
        self.extras.then_some(self as &dyn AnnotationSource)
    }

    fn tag_keys(&self) -> Option<&dyn TagKeySource> {
        self.extras.then_some(self as &dyn TagKeySource)
    }

    fn tag_values(&self) -> Option<&dyn TagValueSource> {
        self.extras.then_some(self as &dyn TagValueSource)
    }
}

#[async_trait]
impl QuerySource for SeriesHandler {
    async fn query(
        &self,
        _ctx: &RequestContext,
        target: &Target,
        _args: &QueryArgs,
    ) -> Result<QueryResponse, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TimeSeries {
            target: target.target.clone(),
            datapoints: minutes(self.values.len())
                .into_iter()
                .zip(&self.values)
                .map(|(t, v)| DataPoint::new(t, *v))
                .collect(),
        }
        .into())
    }
}

#[async_trait]
impl AnnotationSource for SeriesHandler {
    async fn annotations(
        &self,
        _request: &AnnotationRequest,
    ) -> Result<Vec<Annotation>, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_extras {
            return Err("annotations unavailable".into());
        }
        let mut annotation = Annotation::new(start(), "foo")
            .with_text("bar")
            .with_tags(["A", "B"]);
        annotation.request = AnnotationDescriptor::default().with("name", "set by handler");
        Ok(vec![annotation])
    }
}

#[async_trait]
impl TagKeySource for SeriesHandler {
    async fn tag_keys(&self, _ctx: &RequestContext) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        vec!["some-key".into()]
    }
}

#[async_trait]
impl TagValueSource for SeriesHandler {
    async fn tag_values(
        &self,
        _ctx: &RequestContext,
        key: &str,
    ) -> Result<Vec<String>, HandlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_extras {
            return Err("tag index unavailable".into());
        }
        Ok(vec![format!("{key}-1"), format!("{key}-2")])
    }
}

/// Fixed table.
pub struct TableHandler;

impl Handler for TableHandler {
    fn query(&self) -> Option<&dyn QuerySource> {
        Some(self)
    }
}

#[async_trait]
impl QuerySource for TableHandler {
    async fn query(
        &self,
        _ctx: &RequestContext,
        _target: &Target,
        _args: &QueryArgs,
    ) -> Result<QueryResponse, HandlerError> {
        Ok(Table::new(vec![
            Column::new("Time", ColumnData::Time(minutes(2))),
            Column::new("Label", ColumnData::String(vec!["foo".into(), "bar".into()])),
            Column::new("Series A", ColumnData::Number(vec![42.0, 43.0])),
            Column::new("Series B", ColumnData::Number(vec![64.5, 100.0])),
        ])
        .into())
    }
}

/// Fails every query.
pub struct CrashHandler;

impl Handler for CrashHandler {
    fn query(&self) -> Option<&dyn QuerySource> {
        Some(self)
    }
}

#[async_trait]
impl QuerySource for CrashHandler {
    async fn query(
        &self,
        _ctx: &RequestContext,
        _target: &Target,
        _args: &QueryArgs,
    ) -> Result<QueryResponse, HandlerError> {
        Err("server crash".into())
    }
}

/// Registry mirroring a typical deployment: `A`, `B`, `C` (table), `Crash`.
pub fn standard_registry() -> Registry {
    Registry::builder()
        .register("B", SeriesHandler::new(&[100.0, 99.0, 98.0]))
        .register("A", SeriesHandler::new(&[100.0, 101.0, 103.0]).with_extras())
        .register("Crash", CrashHandler)
        .register("C", TableHandler)
        .build()
}

pub fn server(registry: Registry) -> SimpleJsonServer {
    SimpleJsonServer::new(ServerConfig::default(), registry)
}

/// Send one request through the router and collect status, headers and body.
pub async fn call(
    server: &SimpleJsonServer,
    method: Method,
    uri: &str,
    body: &str,
) -> (Response<()>, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = server.router().oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    (
        Response::from_parts(parts, ()),
        String::from_utf8(bytes.to_vec()).unwrap(),
    )
}

pub const QUERY_TEMPLATE: &str = r#"{
    "maxDataPoints": 100,
    "interval": "1y",
    "range": {
        "from": "2020-01-01T00:00:00.000Z",
        "to": "2020-12-31T00:00:00.000Z"
    },
    "targets": TARGETS
}"#;

pub fn query_body(targets: &str) -> String {
    QUERY_TEMPLATE.replace("TARGETS", targets)
}
