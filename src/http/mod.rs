//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → endpoints.rs (one handler per protocol endpoint)
//!     → envelope.rs (decode body, run dispatcher, encode results)
//!     → JSON array or plain-text error to the client
//! ```

pub mod endpoints;
pub mod envelope;
pub mod server;

pub use endpoints::X_REQUEST_ID;
pub use envelope::{EnvelopeError, NoParams, JSON_CONTENT_TYPE};
pub use server::{AppState, SimpleJsonServer};
