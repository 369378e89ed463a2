//! Annotation endpoint shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::query::Range;

/// Decoded body of `POST /annotations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationRequest {
    /// Time window being displayed.
    pub range: Range,

    /// Descriptor of the annotation query, echoed back in every result.
    pub annotation: AnnotationDescriptor,
}

/// The dashboard's description of an annotation query.
///
/// Kept as the raw JSON object the caller sent, so it is echoed back
/// exactly: no keys are added and values of any type are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationDescriptor(Map<String, Value>);

impl AnnotationDescriptor {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Set `key`, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Annotation query name, when sent as a string.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// Query text typed into the annotation editor, when sent as a string.
    pub fn query(&self) -> Option<&str> {
        self.get("query").and_then(Value::as_str)
    }

    /// Whether the annotation query is switched on. Absent means off.
    pub fn is_enabled(&self) -> bool {
        self.get("enable").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for AnnotationDescriptor {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A marker produced by a handler.
///
/// `request` is overwritten with the caller's descriptor before the
/// annotation leaves the server, whatever the handler put there.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub request: AnnotationDescriptor,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,

    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_end: Option<DateTime<Utc>>,

    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
}

impl Annotation {
    pub fn new(time: DateTime<Utc>, title: impl Into<String>) -> Self {
        Self {
            time,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Turn the annotation into a region ending at `end`.
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.time_end = Some(end);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}
