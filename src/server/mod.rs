//! Route ordering and the startup pipeline
//!
//! This module turns a registry of endpoints into the single ordered route
//! sequence a first-match router must register:
//! - `registry`: entity type to endpoint mapping, built once
//! - `specificity`: the total order over routes
//! - `aggregator`: flattening and sorting
//! - `table`: the owned result, mounting and hot swap
//! - `builder`: fluent startup API
//! - `info`: base path listing over HTTP

pub mod aggregator;
pub mod builder;
pub mod info;
pub mod registry;
pub mod specificity;
pub mod table;

pub use aggregator::{RouteWrapper, aggregate, sort_routes};
pub use builder::RouteTableBuilder;
pub use info::base_path_routes;
pub use registry::{BasePathInfo, Registry};
pub use specificity::{compare, less, order_signatures};
pub use table::{Route, RouteSink, RouteTable, SharedRouteTable};
