//! Registry mapping each entity type to the endpoint that serves it

use crate::core::{ConfigError, Endpoint, EndpointInfo, EntityType};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

/// Registry for all endpoints in the application
///
/// Each entity type is served by exactly one endpoint. The registry is filled
/// during startup and then shared read-only (typically behind an `Arc`);
/// iteration follows registration order.
#[derive(Debug, Clone)]
pub struct Registry<H> {
    endpoints: IndexMap<EntityType, Endpoint<H>>,
}

impl<H> Registry<H> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            endpoints: IndexMap::new(),
        }
    }

    /// Register an endpoint under its entity type
    ///
    /// A second endpoint for an entity type that is already served is
    /// rejected rather than replacing the first.
    pub fn register(&mut self, endpoint: Endpoint<H>) -> Result<(), ConfigError> {
        match self.endpoints.entry(endpoint.entity_type().clone()) {
            Entry::Occupied(existing) => {
                tracing::warn!(
                    entity_type = %existing.key(),
                    existing = existing.get().name(),
                    rejected = endpoint.name(),
                    "Endpoint rejected, entity type already registered"
                );
                Err(ConfigError::DuplicateEntityType {
                    entity_type: existing.key().to_string(),
                    existing: existing.get().name().to_string(),
                })
            }
            Entry::Vacant(slot) => {
                tracing::debug!(
                    entity_type = %slot.key(),
                    endpoint = endpoint.name(),
                    operations = endpoint.operations().len(),
                    "Endpoint registered"
                );
                slot.insert(endpoint);
                Ok(())
            }
        }
    }

    /// Endpoint serving an entity type
    pub fn get(&self, entity_type: &EntityType) -> Option<&Endpoint<H>> {
        self.endpoints.get(entity_type)
    }

    /// All endpoints, in registration order
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint<H>> {
        self.endpoints.values()
    }

    /// Get all registered entity types
    pub fn entity_types(&self) -> Vec<&EntityType> {
        self.endpoints.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Total number of operations across every endpoint
    pub fn operation_count(&self) -> usize {
        self.endpoints.values().map(|e| e.operations().len()).sum()
    }

    /// Listing of the endpoints flagged for base path output
    pub fn base_path_info(&self) -> BasePathInfo {
        BasePathInfo {
            value: self
                .endpoints
                .values()
                .filter(|e| e.show_output_info())
                .map(Endpoint::info)
                .collect(),
        }
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body returned when the base resource path is requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePathInfo {
    pub value: Vec<EndpointInfo>,
}
