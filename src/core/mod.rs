//! Core module containing the route model and path classification

pub mod endpoint;
pub mod error;
pub mod method;
pub mod pattern;

pub use endpoint::{Endpoint, EndpointBuilder, EndpointInfo, EntityType, Operation};
pub use error::{ConfigError, PatternError, RouteConflict, RouteError};
pub use method::HttpMethod;
pub use pattern::{PathPattern, TENANT_WILDCARD};
