//! Configurable handler used by the dispatcher tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::model::{
    Annotation, AnnotationDescriptor, AnnotationRequest, Column, ColumnData, DataPoint, QueryArgs,
    QueryResponse, Table, Target, TargetKind, TimeSeries,
};
use crate::registry::{
    AnnotationSource, Handler, HandlerError, QuerySource, RequestContext, TagKeySource,
    TagValueSource,
};

pub(crate) fn epoch(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Handler whose capabilities are switched on per test.
#[derive(Default)]
pub(crate) struct FakeHandler {
    pub values: Option<Vec<f64>>,
    pub query_error: bool,
    pub annotations: Option<Result<Vec<String>, String>>,
    pub tag_keys: Option<Vec<String>>,
    pub tag_values: Option<Result<Vec<String>, String>>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeHandler {
    pub fn series(values: &[f64]) -> Self {
        Self {
            values: Some(values.to_vec()),
            ..Default::default()
        }
    }

    pub fn failing_query() -> Self {
        Self {
            values: Some(Vec::new()),
            query_error: true,
            ..Default::default()
        }
    }

    pub fn annotations(titles: &[&str]) -> Self {
        Self {
            annotations: Some(Ok(titles.iter().map(|t| t.to_string()).collect())),
            ..Default::default()
        }
    }

    pub fn failing_annotations() -> Self {
        Self {
            annotations: Some(Err("annotation store offline".into())),
            ..Default::default()
        }
    }

    pub fn tag_keys(keys: &[&str]) -> Self {
        Self {
            tag_keys: Some(keys.iter().map(|k| k.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn tag_values(values: &[&str]) -> Self {
        Self {
            tag_values: Some(Ok(values.iter().map(|v| v.to_string()).collect())),
            ..Default::default()
        }
    }

    pub fn failing_tag_values() -> Self {
        Self {
            tag_values: Some(Err("tag index unavailable".into())),
            ..Default::default()
        }
    }

    pub fn counting(mut self, calls: &Arc<AtomicUsize>) -> Self {
        self.calls = calls.clone();
        self
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Handler for FakeHandler {
    fn query(&self) -> Option<&dyn QuerySource> {
        self.values.as_ref().map(|_| self as &dyn QuerySource)
    }

    fn annotations(&self) -> Option<&dyn AnnotationSource> {
        self.annotations.as_ref().map(|_| self as &dyn AnnotationSource)
    }

    fn tag_keys(&self) -> Option<&dyn TagKeySource> {
        self.tag_keys.as_ref().map(|_| self as &dyn TagKeySource)
    }

    fn tag_values(&self) -> Option<&dyn TagValueSource> {
        self.tag_values.as_ref().map(|_| self as &dyn TagValueSource)
    }
}

#[async_trait]
impl QuerySource for FakeHandler {
    async fn query(
        &self,
        _ctx: &RequestContext,
        target: &Target,
        _args: &QueryArgs,
    ) -> Result<QueryResponse, HandlerError> {
        self.record_call();
        if self.query_error {
            return Err("backend unavailable".into());
        }
        let values = self.values.clone().unwrap_or_default();
        let timestamps: Vec<DateTime<Utc>> = (0..values.len())
            .map(|i| epoch(1577836800 + 60 * i as i64))
            .collect();

        Ok(match target.kind {
            TargetKind::TimeSeries => TimeSeries {
                target: target.target.clone(),
                datapoints: timestamps
                    .into_iter()
                    .zip(values)
                    .map(|(t, v)| DataPoint::new(t, v))
                    .collect(),
            }
            .into(),
            TargetKind::Table => Table::new(vec![
                Column::new("Time", ColumnData::Time(timestamps)),
                Column::new("Value", ColumnData::Number(values)),
            ])
            .into(),
        })
    }
}

#[async_trait]
impl AnnotationSource for FakeHandler {
    async fn annotations(
        &self,
        _request: &AnnotationRequest,
    ) -> Result<Vec<Annotation>, HandlerError> {
        self.record_call();
        match &self.annotations {
            Some(Ok(titles)) => Ok(titles
                .iter()
                .map(|title| {
                    let mut annotation = Annotation::new(epoch(1577836800), title.clone());
                    // handlers may fill this in; it must not reach the caller
                    annotation.request =
                        AnnotationDescriptor::default().with("name", "handler-set");
                    annotation
                })
                .collect()),
            Some(Err(message)) => Err(message.clone().into()),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl TagKeySource for FakeHandler {
    async fn tag_keys(&self, _ctx: &RequestContext) -> Vec<String> {
        self.record_call();
        self.tag_keys.clone().unwrap_or_default()
    }
}

#[async_trait]
impl TagValueSource for FakeHandler {
    async fn tag_values(
        &self,
        _ctx: &RequestContext,
        _key: &str,
    ) -> Result<Vec<String>, HandlerError> {
        self.record_call();
        match &self.tag_values {
            Some(Ok(values)) => Ok(values.clone()),
            Some(Err(message)) => Err(message.clone().into()),
            None => Ok(Vec::new()),
        }
    }
}
