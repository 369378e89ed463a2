//! Capability registry.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RegistryBuilder::register(name, handler) (repeated)
//!     → build() consumes the builder
//!     → Registry (immutable, shared via Arc)
//!
//! Per request:
//!     dispatcher asks "which handlers implement capability X?"
//!     → entries filtered in registration order
//! ```
//!
//! # Design Decisions
//! - Registration is only possible before `build()`, so the registry needs
//!   no locking while requests are served
//! - Capabilities are optional per handler; absence means the handler is
//!   never asked for that endpoint

pub mod context;
pub mod handler;
pub mod lookup;

pub use context::RequestContext;
pub use handler::{
    AnnotationSource, Handler, HandlerError, QuerySource, TagKeySource, TagValueSource,
};
pub use lookup::{Registry, RegistryBuilder};
