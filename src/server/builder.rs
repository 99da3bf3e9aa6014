//! RouteTableBuilder for collecting endpoints from independent modules

use super::registry::Registry;
use super::table::{RouteTable, SharedRouteTable};
use crate::config::RoutesConfig;
use crate::core::{Endpoint, RouteError};
use std::sync::Arc;

/// Builder that assembles the registry and orders its routes
///
/// # Example
///
/// ```ignore
/// let (registry, table) = RouteTableBuilder::new()
///     .register_endpoint(things_endpoint)?
///     .register_config(&RoutesConfig::from_yaml_file("routes.yaml")?, |name| handlers.get(name).cloned())?
///     .build()?;
///
/// table.mount(&mut router);
/// ```
pub struct RouteTableBuilder<H> {
    registry: Registry<H>,
}

impl<H> RouteTableBuilder<H> {
    /// Create a new RouteTableBuilder
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Register a single endpoint
    pub fn register_endpoint(mut self, endpoint: Endpoint<H>) -> Result<Self, RouteError> {
        self.registry.register(endpoint)?;
        Ok(self)
    }

    /// Register every endpoint declared in a route configuration
    ///
    /// `resolver` maps handler names from the configuration to handlers.
    pub fn register_config<F>(mut self, config: &RoutesConfig, resolver: F) -> Result<Self, RouteError>
    where
        F: FnMut(&str) -> Option<H>,
    {
        for endpoint in config.to_endpoints(resolver)? {
            self.registry.register(endpoint)?;
        }
        Ok(self)
    }

    /// Finish without ordering
    pub fn build_registry(self) -> Registry<H> {
        self.registry
    }
}

impl<H: Clone> RouteTableBuilder<H> {
    /// Freeze the registry and compute the registration order
    ///
    /// Fails with [`RouteError::Conflict`] if two operations share a method
    /// and pattern; startup should abort in that case.
    pub fn build(self) -> Result<(Arc<Registry<H>>, RouteTable<H>), RouteError> {
        let registry = Arc::new(self.registry);
        let table = RouteTable::from_registry(&registry)?;
        Ok((registry, table))
    }

    /// Like [`build`](Self::build), with a table that can be swapped later
    pub fn build_shared(self) -> Result<(Arc<Registry<H>>, SharedRouteTable<H>), RouteError> {
        let (registry, table) = self.build()?;
        Ok((registry, SharedRouteTable::new(table)))
    }
}

impl<H> Default for RouteTableBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
