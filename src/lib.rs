//! # route-precedence
//!
//! Deterministic registration order for HTTP routes declared by many
//! independent resource modules.
//!
//! A first-match router dispatches a request to the first registered pattern
//! that accepts it. When modules register overlapping patterns such as
//! `/v1.0/Things`, `/v1.0/Things{id}` and `/v1.0/{c:.*}/Things`, the order
//! decides which handler runs. This crate computes that order once, at
//! startup, so that the most specific route always wins.
//!
//! ## Features
//!
//! - **Path classification**: validated patterns with `{name}` / `{name:regex}`
//!   placeholders and the reserved `{c:.*}` tenant wildcard
//! - **Specificity order**: a total order over (method, pattern) pairs
//! - **Conflict detection**: duplicate dispatch signatures are a typed error,
//!   not a silent tie
//! - **Configuration-Based**: declare endpoints in YAML and resolve handlers by name
//! - **Hot swap**: rebuild and publish a new table atomically
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use route_precedence::prelude::*;
//!
//! let things = Endpoint::builder("Things", "Thing")
//!     .operation(HttpMethod::Get, "/v1.0/Things", handle_get_things)
//!     .operation(HttpMethod::Get, "/v1.0/Things{id}", handle_get_thing)
//!     .operation(HttpMethod::Get, "/v1.0/{c:.*}/Things", handle_get_things)
//!     .build()?;
//!
//! let (registry, table) = RouteTableBuilder::new()
//!     .register_endpoint(things)?
//!     .build()?;
//!
//! for route in &table {
//!     router.add(route.method, route.path.as_str(), route.handler.clone());
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Model ===
    pub use crate::core::{
        Endpoint, EndpointBuilder, EndpointInfo, EntityType, HttpMethod, Operation, PathPattern,
        TENANT_WILDCARD,
    };

    // === Errors ===
    pub use crate::core::{ConfigError, PatternError, RouteConflict, RouteError};

    // === Ordering ===
    pub use crate::server::{
        BasePathInfo, Registry, Route, RouteSink, RouteTable, RouteTableBuilder, RouteWrapper,
        SharedRouteTable, aggregate, base_path_routes, compare, less,
    };

    // === Config ===
    pub use crate::config::{EndpointConfig, OperationConfig, RoutesConfig};
}
