//! Endpoint dispatchers.
//!
//! # Data Flow
//! ```text
//! typed request
//!     → dispatcher (discovery / query / annotations / tags)
//!     → Registry lookup for the needed capability
//!     → handlers called one after another, in registration order
//!     → policy.rs folds each outcome (fail fast or skip)
//!     → ordered result list
//! ```
//!
//! # Design Decisions
//! - Handler calls are sequential; a slow handler delays the whole response
//! - Each dispatcher declares its [`AggregationPolicy`] as a constant:
//!   query and tag values fail fast, annotations and tag keys are best effort
//! - Fail-fast dispatchers never return partial results

pub mod annotations;
pub mod discovery;
pub mod error;
pub mod policy;
pub mod query;
pub mod tags;

#[cfg(test)]
pub(crate) mod fixtures;

pub use annotations::annotations;
pub use discovery::discover;
pub use error::DispatchError;
pub use policy::AggregationPolicy;
pub use query::query;
pub use tags::{tag_keys, tag_values};
