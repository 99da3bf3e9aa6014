//! Route declaration loading and merging
//!
//! Resource modules may declare their endpoints in YAML instead of code.
//! Handlers are referenced by name and resolved when the endpoint is built.
//!
//! ```yaml
//! external_url: http://localhost:8080
//! endpoints:
//!   - name: Things
//!     entity_type: Thing
//!     output_info: true
//!     expand: [Locations, Datastreams]
//!     operations:
//!       - { method: GET, path: /v1.0/Things, handler: get_things }
//!       - { method: GET, path: "/v1.0/Things{id}", handler: get_thing }
//! ```

use crate::core::{ConfigError, Endpoint, HttpMethod, RouteError};
use serde::{Deserialize, Serialize};

/// One operation declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationConfig {
    pub method: HttpMethod,

    /// Path pattern, validated when the endpoint is built
    pub path: String,

    /// Name passed to the handler resolver
    pub handler: String,
}

/// One endpoint declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub name: String,

    pub entity_type: String,

    /// External URL; derived from `external_url` and `name` when omitted
    #[serde(default)]
    pub url: Option<String>,

    /// List this endpoint in base path info
    #[serde(default)]
    pub output_info: bool,

    #[serde(default)]
    pub operations: Vec<OperationConfig>,

    /// Supported `$expand` parameters
    #[serde(default)]
    pub expand: Vec<String>,

    /// Supported `$select` parameters
    #[serde(default)]
    pub select: Vec<String>,
}

impl EndpointConfig {
    /// Build the endpoint, resolving each handler name
    pub fn to_endpoint<H, F>(&self, external_url: Option<&str>, resolver: &mut F) -> Result<Endpoint<H>, RouteError>
    where
        F: FnMut(&str) -> Option<H>,
    {
        let url = match (&self.url, external_url) {
            (Some(url), _) => url.clone(),
            (None, Some(base)) => format!("{}/{}", base.trim_end_matches('/'), self.name),
            (None, None) => String::new(),
        };

        let mut builder = Endpoint::builder(&self.name, self.entity_type.as_str())
            .url(url)
            .output_info(self.output_info)
            .expand_params(self.expand.iter().cloned())
            .select_params(self.select.iter().cloned());

        for op in &self.operations {
            let handler = resolver(&op.handler).ok_or_else(|| ConfigError::UnknownHandler {
                endpoint: self.name.clone(),
                handler: op.handler.clone(),
            })?;
            builder = builder.operation(op.method, op.path.as_str(), handler);
        }

        builder.build()
    }
}

/// Complete route declaration of one module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Base used to derive endpoint URLs
    #[serde(default)]
    pub external_url: Option<String>,

    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

impl RoutesConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Merge declarations from several modules
    ///
    /// Endpoints are concatenated in order; the first `external_url` wins.
    /// Conflicts between endpoints are reported later, when the registry is
    /// built, so nothing is silently dropped here.
    pub fn merge(configs: Vec<RoutesConfig>) -> Self {
        configs.into_iter().fold(RoutesConfig::default(), |mut acc, config| {
            if acc.external_url.is_none() {
                acc.external_url = config.external_url;
            }
            acc.endpoints.extend(config.endpoints);
            acc
        })
    }

    /// Build every declared endpoint
    pub fn to_endpoints<H, F>(&self, mut resolver: F) -> Result<Vec<Endpoint<H>>, RouteError>
    where
        F: FnMut(&str) -> Option<H>,
    {
        self.endpoints
            .iter()
            .map(|e| e.to_endpoint(self.external_url.as_deref(), &mut resolver))
            .collect()
    }

    pub fn operation_count(&self) -> usize {
        self.endpoints.iter().map(|e| e.operations.len()).sum()
    }
}
