//! Request and response shapes of the simple JSON protocol.
//!
//! # Data Flow
//! ```text
//! request body (JSON)
//!     → query.rs / annotation.rs / tag.rs (typed request)
//!     → handlers produce typed results
//!     → encoded back into the wire shapes the dashboard expects
//! ```
//!
//! # Design Decisions
//! - Every request type implements `Default`, so an empty body yields a
//!   zero-valued request
//! - Wire encodings are hand-written where the JSON shape differs from the
//!   Rust shape (datapoint pairs, table rows)

pub mod annotation;
pub mod number;
pub mod query;
pub mod tag;

pub use annotation::{Annotation, AnnotationDescriptor, AnnotationRequest};
pub use query::{
    AdHocFilter, Column, ColumnData, DataPoint, QueryArgs, QueryRequest, QueryResponse, Range,
    Table, Target, TargetKind, TimeSeries,
};
pub use tag::{TagKey, TagValue, TagValuesRequest};
