//! Typed error handling for route registration
//!
//! Every failure in this crate happens at startup, while the registry is
//! assembled and ordered. Nothing here is a request-time condition.
//!
//! # Error Categories
//!
//! - [`PatternError`]: a path pattern violates the placeholder grammar
//! - [`ConfigError`]: endpoints or route declarations are inconsistent
//! - [`RouteConflict`]: two operations claim the exact same dispatch signature
//!
//! # Example
//!
//! ```rust,ignore
//! use route_precedence::prelude::*;
//!
//! match RouteTableBuilder::new().register_endpoint(endpoint)?.build() {
//!     Ok((registry, table)) => table.mount(&mut router),
//!     Err(RouteError::Conflict(conflict)) => {
//!         eprintln!("fix the route configuration: {}", conflict);
//!         std::process::exit(1);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use super::method::HttpMethod;
use thiserror::Error;

/// Umbrella error for the crate
#[derive(Debug, Error)]
pub enum RouteError {
    /// Malformed path pattern
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Inconsistent endpoint or route configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fatal duplicate dispatch signature
    #[error(transparent)]
    Conflict(#[from] RouteConflict),
}

impl RouteError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            RouteError::Pattern(e) => e.error_code(),
            RouteError::Config(e) => e.error_code(),
            RouteError::Conflict(_) => "ROUTE_CONFLICT",
        }
    }

    /// True if this is the duplicate-route condition
    pub fn is_conflict(&self) -> bool {
        matches!(self, RouteError::Conflict(_))
    }
}

// =============================================================================
// Pattern Errors
// =============================================================================

/// A path pattern that violates the `{name}` / `{name:regex}` grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `{` is never closed
    #[error("unclosed placeholder in '{pattern}' opened at byte {position}")]
    UnclosedPlaceholder { pattern: String, position: usize },

    /// A `}` appears outside any placeholder
    #[error("unexpected '}}' in '{pattern}' at byte {position}")]
    UnexpectedClose { pattern: String, position: usize },

    /// The regex part of `{name:regex}` does not compile
    #[error("invalid regex for placeholder '{placeholder}' in '{pattern}': {message}")]
    InvalidRegex {
        pattern: String,
        placeholder: String,
        message: String,
    },
}

impl PatternError {
    pub fn error_code(&self) -> &'static str {
        match self {
            PatternError::UnclosedPlaceholder { .. } => "PATTERN_UNCLOSED_PLACEHOLDER",
            PatternError::UnexpectedClose { .. } => "PATTERN_UNEXPECTED_CLOSE",
            PatternError::InvalidRegex { .. } => "PATTERN_INVALID_REGEX",
        }
    }

    /// The offending pattern text
    pub fn pattern(&self) -> &str {
        match self {
            PatternError::UnclosedPlaceholder { pattern, .. }
            | PatternError::UnexpectedClose { pattern, .. }
            | PatternError::InvalidRegex { pattern, .. } => pattern,
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while assembling endpoints and the registry
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Two endpoints registered for the same entity type
    #[error("entity type '{entity_type}' is already served by endpoint '{existing}'")]
    DuplicateEntityType {
        entity_type: String,
        existing: String,
    },

    /// The same (method, path) pair declared twice within one endpoint
    #[error("endpoint '{endpoint}' declares {method} {path} more than once")]
    DuplicateOperation {
        endpoint: String,
        method: HttpMethod,
        path: String,
    },

    /// A route declaration names a handler the resolver does not know
    #[error("endpoint '{endpoint}' references unknown handler '{handler}'")]
    UnknownHandler { endpoint: String, handler: String },

    /// Route declaration file could not be read
    #[error("failed to read route configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Route declaration could not be parsed
    #[error("invalid route configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::DuplicateEntityType { .. } => "DUPLICATE_ENTITY_TYPE",
            ConfigError::DuplicateOperation { .. } => "DUPLICATE_OPERATION",
            ConfigError::UnknownHandler { .. } => "UNKNOWN_HANDLER",
            ConfigError::Io { .. } => "CONFIG_IO_ERROR",
            ConfigError::Yaml(_) => "CONFIG_PARSE_ERROR",
        }
    }
}

impl From<serde_yaml::Error> for RouteError {
    fn from(err: serde_yaml::Error) -> Self {
        RouteError::Config(ConfigError::Yaml(err))
    }
}

// =============================================================================
// Route Conflict
// =============================================================================

/// Two operations resolve to the same method and pattern text
///
/// Specificity cannot rank them, so whichever a first-match router saw first
/// would silently shadow the other. Startup must abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "two endpoints can't be the same: {method} {path} is declared by both '{first_endpoint}' and '{second_endpoint}'"
)]
pub struct RouteConflict {
    pub method: HttpMethod,
    pub path: String,
    pub first_endpoint: String,
    pub second_endpoint: String,
}

pub type Result<T, E = RouteError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_both_endpoints() {
        let err = RouteConflict {
            method: HttpMethod::Get,
            path: "/v1.0/Things".to_string(),
            first_endpoint: "Things".to_string(),
            second_endpoint: "Locations".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GET /v1.0/Things"));
        assert!(msg.contains("'Things'"));
        assert!(msg.contains("'Locations'"));
    }

    #[test]
    fn test_error_codes() {
        let err: RouteError = PatternError::UnexpectedClose {
            pattern: "a}".to_string(),
            position: 1,
        }
        .into();
        assert_eq!(err.error_code(), "PATTERN_UNEXPECTED_CLOSE");
        assert!(!err.is_conflict());

        let err: RouteError = ConfigError::UnknownHandler {
            endpoint: "Things".to_string(),
            handler: "missing".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "UNKNOWN_HANDLER");
    }

    #[test]
    fn test_conflict_is_conflict() {
        let err: RouteError = RouteConflict {
            method: HttpMethod::Post,
            path: "ep1".to_string(),
            first_endpoint: "a".to_string(),
            second_endpoint: "b".to_string(),
        }
        .into();
        assert!(err.is_conflict());
        assert_eq!(err.error_code(), "ROUTE_CONFLICT");
    }

    #[test]
    fn test_pattern_accessor() {
        let err = PatternError::UnclosedPlaceholder {
            pattern: "/Things{id".to_string(),
            position: 7,
        };
        assert_eq!(err.pattern(), "/Things{id");
        assert!(err.to_string().contains("byte 7"));
    }
}
