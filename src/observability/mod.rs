//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request
//! - Metrics are recorded per endpoint, not per handler

pub mod logging;
pub mod metrics;
