//! Demo handlers served by the `simplejson` binary.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use simplejson_server::model::{
    Annotation, AnnotationRequest, Column, ColumnData, DataPoint, QueryArgs, QueryResponse, Table,
    Target, TimeSeries,
};
use simplejson_server::{
    AnnotationSource, Handler, HandlerError, QuerySource, Registry, RequestContext, TagKeySource,
    TagValueSource,
};

const DEMO_TAG_KEY: &str = "some-key";

pub fn registry() -> Registry {
    Registry::builder()
        .register("A", Series::new(&[100.0, 101.0, 103.0]).with_markers())
        .register("B", Series::new(&[100.0, 99.0, 98.0]))
        .register("C", Scoreboard)
        .register("Crash", Crash)
        .build()
}

/// One point per minute from the start of the requested range.
struct Series {
    values: Vec<f64>,
    markers: bool,
}

impl Series {
    fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            markers: false,
        }
    }

    fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }
}

fn minutes_from(start: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    (0..count)
        .map(|i| start + Duration::minutes(i as i64))
        .collect()
}

impl Handler for Series {
    fn query(&self) -> Option<&dyn QuerySource> {
        Some(self)
    }

    fn annotations(&self) -> Option<&dyn AnnotationSource> {
        self.markers.then_some(self as &dyn AnnotationSource)
    }

    fn tag_keys(&self) -> Option<&dyn TagKeySource> {
        self.markers.then_some(self as &dyn TagKeySource)
    }

    fn tag_values(&self) -> Option<&dyn TagValueSource> {
        self.markers.then_some(self as &dyn TagValueSource)
    }
}

#[async_trait]
impl QuerySource for Series {
    async fn query(
        &self,
        _ctx: &RequestContext,
        target: &Target,
        args: &QueryArgs,
    ) -> Result<QueryResponse, HandlerError> {
        let datapoints = minutes_from(args.range.from, self.values.len())
            .into_iter()
            .zip(&self.values)
            .map(|(timestamp, value)| DataPoint::new(timestamp, *value))
            .collect();

        Ok(TimeSeries {
            target: target.target.clone(),
            datapoints,
        }
        .into())
    }
}

#[async_trait]
impl AnnotationSource for Series {
    async fn annotations(
        &self,
        request: &AnnotationRequest,
    ) -> Result<Vec<Annotation>, HandlerError> {
        Ok(vec![Annotation::new(request.range.from, "foo")
            .with_text("bar")
            .with_tags(["A", "B"])])
    }
}

#[async_trait]
impl TagKeySource for Series {
    async fn tag_keys(&self, _ctx: &RequestContext) -> Vec<String> {
        vec![DEMO_TAG_KEY.to_string()]
    }
}

#[async_trait]
impl TagValueSource for Series {
    async fn tag_values(
        &self,
        _ctx: &RequestContext,
        key: &str,
    ) -> Result<Vec<String>, HandlerError> {
        if key != DEMO_TAG_KEY {
            return Err(format!("unsupported tag key {key:?}").into());
        }
        Ok(vec!["A".into(), "B".into(), "C".into()])
    }
}

/// Fixed two-row table.
struct Scoreboard;

impl Handler for Scoreboard {
    fn query(&self) -> Option<&dyn QuerySource> {
        Some(self)
    }
}

#[async_trait]
impl QuerySource for Scoreboard {
    async fn query(
        &self,
        _ctx: &RequestContext,
        _target: &Target,
        args: &QueryArgs,
    ) -> Result<QueryResponse, HandlerError> {
        Ok(Table::new(vec![
            Column::new("Time", ColumnData::Time(minutes_from(args.range.from, 2))),
            Column::new("Label", ColumnData::String(vec!["foo".into(), "bar".into()])),
            Column::new("Series A", ColumnData::Number(vec![42.0, 43.0])),
            Column::new("Series B", ColumnData::Number(vec![64.5, 100.0])),
        ])
        .into())
    }
}

/// Always fails, to show how a broken data source surfaces.
struct Crash;

impl Handler for Crash {
    fn query(&self) -> Option<&dyn QuerySource> {
        Some(self)
    }
}

#[async_trait]
impl QuerySource for Crash {
    async fn query(
        &self,
        _ctx: &RequestContext,
        _target: &Target,
        _args: &QueryArgs,
    ) -> Result<QueryResponse, HandlerError> {
        Err("server crash".into())
    }
}
