//! Server side of the simple JSON data source protocol.
//!
//! A dashboard asks the server for target names, series and tables,
//! annotations, and tag metadata. The server fans each request out to the
//! registered [`Handler`]s that implement the matching capability and
//! merges their answers into one ordered JSON array.
//!
//! ```no_run
//! use simplejson_server::{config::ServerConfig, lifecycle, Registry};
//! # struct MySource;
//! # impl simplejson_server::Handler for MySource {}
//!
//! # async fn run() -> std::io::Result<()> {
//! let registry = Registry::builder().register("cpu", MySource).build();
//! lifecycle::serve(ServerConfig::default(), registry).await
//! # }
//! ```

// Core
pub mod dispatch;
pub mod http;
pub mod model;
pub mod registry;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use dispatch::{AggregationPolicy, DispatchError};
pub use http::SimpleJsonServer;
pub use lifecycle::Shutdown;
pub use registry::{
    AnnotationSource, Handler, HandlerError, QuerySource, Registry, RegistryBuilder,
    RequestContext, TagKeySource, TagValueSource,
};
