//! Query endpoint shapes.
//!
//! A query names one or more targets. Each target resolves to exactly one
//! handler, which answers with either a time series or a table.

use chrono::{DateTime, Utc};
use serde::ser::{Error as _, SerializeSeq, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::model::number::Number;

/// Decoded body of `POST /query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Arguments shared by every target in the request.
    #[serde(flatten)]
    pub args: QueryArgs,

    /// Targets to resolve, answered in this order.
    #[serde(default)]
    pub targets: Vec<Target>,
}

/// Query arguments handed to the handler owning each target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryArgs {
    /// Upper bound on points the dashboard will render.
    pub max_data_points: u64,

    /// Suggested sampling interval, e.g. `"30s"`.
    pub interval: String,

    /// Time window being displayed.
    pub range: Range,

    /// Ad-hoc filters chosen on the dashboard.
    pub adhoc_filters: Vec<AdHocFilter>,
}

/// Time window of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Range {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Key/value filter set on the dashboard, passed through to handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdHocFilter {
    pub key: String,
    pub operator: String,
    pub value: String,
}

/// A single named series or table requested by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Name used to find the owning handler.
    #[serde(default)]
    pub target: String,

    /// Requested result shape.
    #[serde(default, rename = "type")]
    pub kind: TargetKind,
}

impl Target {
    pub fn new(target: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            target: target.into(),
            kind,
        }
    }
}

/// Result shape requested for a target.
///
/// Anything other than `"table"` is treated as a time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetKind {
    #[default]
    TimeSeries,
    Table,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::TimeSeries => "timeserie",
            TargetKind::Table => "table",
        }
    }
}

impl Serialize for TargetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TargetKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kind = String::deserialize(deserializer)?;
        Ok(match kind.as_str() {
            "table" => TargetKind::Table,
            _ => TargetKind::TimeSeries,
        })
    }
}

/// Answer for one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    TimeSeries(TimeSeries),
    Table(Table),
}

impl From<TimeSeries> for QueryResponse {
    fn from(series: TimeSeries) -> Self {
        QueryResponse::TimeSeries(series)
    }
}

impl From<Table> for QueryResponse {
    fn from(table: Table) -> Self {
        QueryResponse::Table(table)
    }
}

/// Points of a single series.
///
/// Encoded as `{"target": .., "datapoints": [[value, epoch_ms], ..]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub target: String,
    pub datapoints: Vec<DataPoint>,
}

/// One sample of a time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl DataPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl Serialize for DataPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_seq(Some(2))?;
        pair.serialize_element(&Number(self.value))?;
        pair.serialize_element(&self.timestamp.timestamp_millis())?;
        pair.end()
    }
}

/// Column-oriented table.
///
/// Encoded row-wise as `{"type": "table", "columns": [..], "rows": [..]}`.
/// Every column must hold the same number of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
}

/// Named column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub text: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(text: impl Into<String>, data: ColumnData) -> Self {
        Self {
            text: text.into(),
            data,
        }
    }
}

/// Typed cells of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Time(Vec<DateTime<Utc>>),
    String(Vec<String>),
    Number(Vec<f64>),
}

impl ColumnData {
    /// Column type as reported in the table header.
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnData::Time(_) => "time",
            ColumnData::String(_) => "string",
            ColumnData::Number(_) => "number",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Time(v) => v.len(),
            ColumnData::String(v) => v.len(),
            ColumnData::Number(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, row: usize) -> Cell<'_> {
        match self {
            ColumnData::Time(v) => Cell::Time(&v[row]),
            ColumnData::String(v) => Cell::Text(&v[row]),
            ColumnData::Number(v) => Cell::Number(Number(v[row])),
        }
    }
}

/// Errors raised when a table cannot be laid out as rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("column {column:?} has {len} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        len: usize,
        expected: usize,
    },
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Number of rows, checking that all columns agree.
    pub fn row_count(&self) -> Result<usize, TableError> {
        let expected = self.columns.first().map(|c| c.data.len()).unwrap_or(0);
        for column in &self.columns {
            let len = column.data.len();
            if len != expected {
                return Err(TableError::RaggedColumn {
                    column: column.text.clone(),
                    len,
                    expected,
                });
            }
        }
        Ok(expected)
    }
}

#[derive(Serialize)]
struct ColumnHeader<'a> {
    text: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Cell<'a> {
    Time(&'a DateTime<Utc>),
    Text(&'a str),
    Number(Number),
}

struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.table.columns.len()))?;
        for column in &self.table.columns {
            seq.serialize_element(&column.data.cell(self.index))?;
        }
        seq.end()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows = self.row_count().map_err(S::Error::custom)?;

        let headers: Vec<ColumnHeader<'_>> = self
            .columns
            .iter()
            .map(|c| ColumnHeader {
                text: &c.text,
                kind: c.data.type_name(),
            })
            .collect();
        let rows: Vec<Row<'_>> = (0..rows).map(|index| Row { table: self, index }).collect();

        let mut table = serializer.serialize_struct("Table", 3)?;
        table.serialize_field("type", "table")?;
        table.serialize_field("columns", &headers)?;
        table.serialize_field("rows", &rows)?;
        table.end()
    }
}
