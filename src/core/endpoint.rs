//! Endpoint and operation model
//!
//! An [`Endpoint`] groups the operations one resource module exposes, plus
//! descriptive metadata that the ordering never looks at. Endpoints are built
//! once at startup and are read-only afterwards.

use super::error::{ConfigError, RouteError};
use super::method::HttpMethod;
use super::pattern::PathPattern;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Resource kind an endpoint serves (e.g. "Thing", "Datastream")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One HTTP-method/path binding
///
/// `handler` is opaque: it is carried through ordering and handed to the
/// router-mounting side untouched.
#[derive(Debug, Clone)]
pub struct Operation<H> {
    method: HttpMethod,
    path: PathPattern,
    handler: H,
}

impl<H> Operation<H> {
    pub fn new(method: HttpMethod, path: PathPattern, handler: H) -> Self {
        Self {
            method,
            path,
            handler,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &PathPattern {
        &self.path
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// A named collection of operations for one resource kind
#[derive(Debug, Clone)]
pub struct Endpoint<H> {
    name: String,
    url: String,
    entity_type: EntityType,
    output_info: bool,
    operations: Vec<Operation<H>>,
    supported_expand_params: Vec<String>,
    supported_select_params: Vec<String>,
}

impl<H> Endpoint<H> {
    /// Start building an endpoint
    ///
    /// # Example
    ///
    /// ```ignore
    /// let things = Endpoint::builder("Things", "Thing")
    ///     .url("http://localhost:8080/v1.0/Things")
    ///     .output_info(true)
    ///     .operation(HttpMethod::Get, "/v1.0/Things", handle_get_things)
    ///     .operation(HttpMethod::Get, "/v1.0/Things{id}", handle_get_thing)
    ///     .build()?;
    /// ```
    pub fn builder(name: impl Into<String>, entity_type: impl Into<EntityType>) -> EndpointBuilder<H> {
        EndpointBuilder {
            name: name.into(),
            url: String::new(),
            entity_type: entity_type.into(),
            output_info: false,
            operations: Vec::new(),
            supported_expand_params: Vec::new(),
            supported_select_params: Vec::new(),
        }
    }

    /// Endpoint name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// External URL of the endpoint
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    /// True if the endpoint is listed when base path info is requested
    pub fn show_output_info(&self) -> bool {
        self.output_info
    }

    /// All operations for this endpoint, in declaration order
    pub fn operations(&self) -> &[Operation<H>] {
        &self.operations
    }

    /// Entities that can be expanded from this endpoint
    pub fn supported_expand_params(&self) -> &[String] {
        &self.supported_expand_params
    }

    /// Fields that can be selected on this endpoint
    pub fn supported_select_params(&self) -> &[String] {
        &self.supported_select_params
    }

    /// Name/URL pair used in base path listings
    pub fn info(&self) -> EndpointInfo {
        EndpointInfo {
            name: self.name.clone(),
            url: self.url.clone(),
        }
    }
}

/// Builder for [`Endpoint`]
///
/// Patterns are validated and duplicate (method, path) pairs rejected in
/// [`EndpointBuilder::build`].
pub struct EndpointBuilder<H> {
    name: String,
    url: String,
    entity_type: EntityType,
    output_info: bool,
    operations: Vec<(HttpMethod, String, H)>,
    supported_expand_params: Vec<String>,
    supported_select_params: Vec<String>,
}

impl<H> EndpointBuilder<H> {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn output_info(mut self, output_info: bool) -> Self {
        self.output_info = output_info;
        self
    }

    pub fn operation(mut self, method: HttpMethod, path: impl Into<String>, handler: H) -> Self {
        self.operations.push((method, path.into(), handler));
        self
    }

    pub fn expand_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_expand_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn select_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_select_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<Endpoint<H>, RouteError> {
        let mut seen = HashSet::new();
        let mut operations = Vec::with_capacity(self.operations.len());

        for (method, path, handler) in self.operations {
            let path = PathPattern::parse(path)?;
            if !seen.insert((method, path.as_str().to_string())) {
                return Err(ConfigError::DuplicateOperation {
                    endpoint: self.name,
                    method,
                    path: path.into(),
                }
                .into());
            }
            operations.push(Operation::new(method, path, handler));
        }

        Ok(Endpoint {
            name: self.name,
            url: self.url,
            entity_type: self.entity_type,
            output_info: self.output_info,
            operations,
            supported_expand_params: self.supported_expand_params,
            supported_select_params: self.supported_select_params,
        })
    }
}

/// Public description of an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub name: String,
    pub url: String,
}
