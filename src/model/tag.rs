//! Tag metadata shapes used by dashboard ad-hoc filters.

use serde::{Deserialize, Serialize};

/// A filterable key. Only string keys are offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagKey {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl TagKey {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "string",
            text: text.into(),
        }
    }
}

/// A value available for a tag key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagValue {
    pub text: String,
}

impl TagValue {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Decoded body of `POST /tag-values`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagValuesRequest {
    pub key: String,
}
