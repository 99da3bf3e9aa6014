//! Path pattern classification
//!
//! A pattern is literal text optionally interspersed with placeholders
//! `{name}` or `{name:regex}`. The placeholder `{c:.*}` is reserved: it is the
//! tenant/catalog wildcard that lets one resource tree be mounted under an
//! arbitrary leading segment.
//!
//! Classification never matches anything against a request; it only answers
//! the three questions the specificity order needs.

use super::error::PatternError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The reserved tenant/catalog wildcard token
pub const TENANT_WILDCARD: &str = "{c:.*}";

/// True iff the pattern contains the tenant wildcard token
pub fn has_wildcard_prefix(pattern: &str) -> bool {
    pattern.contains(TENANT_WILDCARD)
}

/// True iff the pattern contains at least one `{`...`}` placeholder
pub fn is_parameterized(pattern: &str) -> bool {
    pattern.contains('{') && pattern.contains('}')
}

/// Number of `{` occurrences in the pattern
pub fn placeholder_count(pattern: &str) -> usize {
    pattern.matches('{').count()
}

/// Length of the literal text after the last placeholder
fn literal_tail_len(pattern: &str) -> usize {
    match pattern.rfind('}') {
        Some(idx) => pattern.len() - idx - 1,
        None => pattern.len(),
    }
}

/// A validated path pattern with its classification cached
///
/// Construct with [`PathPattern::parse`]; deserializing from YAML or JSON
/// goes through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathPattern {
    raw: String,
    wildcard: bool,
    parameterized: bool,
    placeholders: usize,
    literal_tail: usize,
}

impl PathPattern {
    /// Validate and classify a pattern
    ///
    /// Rejects unbalanced braces and placeholder regexes that do not compile.
    /// Braces nested inside a placeholder (`{id:[0-9]{3}}`) belong to its regex.
    pub fn parse(pattern: impl Into<String>) -> Result<Self, PatternError> {
        let raw = pattern.into();
        validate(&raw)?;

        Ok(Self {
            wildcard: has_wildcard_prefix(&raw),
            parameterized: is_parameterized(&raw),
            placeholders: placeholder_count(&raw),
            literal_tail: literal_tail_len(&raw),
            raw,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Byte length of the pattern text
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn has_wildcard_prefix(&self) -> bool {
        self.wildcard
    }

    pub fn is_parameterized(&self) -> bool {
        self.parameterized
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// Literal characters after the last placeholder (whole length if static)
    pub fn literal_tail_len(&self) -> usize {
        self.literal_tail
    }
}

fn validate(raw: &str) -> Result<(), PatternError> {
    let mut depth = 0usize;
    let mut open_at = 0usize;

    for (idx, ch) in raw.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    open_at = idx;
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(PatternError::UnexpectedClose {
                        pattern: raw.to_string(),
                        position: idx,
                    });
                }
                depth -= 1;
                if depth == 0 {
                    check_placeholder(raw, &raw[open_at + 1..idx])?;
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(PatternError::UnclosedPlaceholder {
            pattern: raw.to_string(),
            position: open_at,
        });
    }

    Ok(())
}

fn check_placeholder(raw: &str, body: &str) -> Result<(), PatternError> {
    let Some((name, expr)) = body.split_once(':') else {
        return Ok(());
    };

    Regex::new(expr)
        .map(|_| ())
        .map_err(|e| PatternError::InvalidRegex {
            pattern: raw.to_string(),
            placeholder: name.to_string(),
            message: e.to_string(),
        })
}

impl TryFrom<String> for PathPattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PathPattern::parse(value)
    }
}

impl TryFrom<&str> for PathPattern {
    type Error = PatternError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PathPattern::parse(value)
    }
}

impl From<PathPattern> for String {
    fn from(pattern: PathPattern) -> Self {
        pattern.raw
    }
}

impl AsRef<str> for PathPattern {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_parameterized() {
        assert!(is_parameterized("http://www.{}.nl"));
        assert!(!is_parameterized("http://www.nu.nl"));
    }

    #[test]
    fn test_wildcard_detection() {
        assert!(has_wildcard_prefix("/v1.0/{c:.*}/Things"));
        assert!(has_wildcard_prefix("ep4{c:.*}"));
        assert!(!has_wildcard_prefix("/v1.0/{c}/Things"));
    }

    #[test]
    fn test_wildcard_counts_as_placeholder() {
        let p = PathPattern::parse("{c:.*}ep3").unwrap();
        assert!(p.has_wildcard_prefix());
        assert!(p.is_parameterized());
        assert_eq!(p.placeholder_count(), 1);
    }

    #[test]
    fn test_static_pattern() {
        let p = PathPattern::parse("/v1.0/Things").unwrap();
        assert!(!p.has_wildcard_prefix());
        assert!(!p.is_parameterized());
        assert_eq!(p.placeholder_count(), 0);
        assert_eq!(p.literal_tail_len(), p.len());
    }

    #[test]
    fn test_placeholder_count_counts_open_braces() {
        let p = PathPattern::parse("/v1.0/{c:.*}/Locations{id}/Things/{params}").unwrap();
        assert_eq!(p.placeholder_count(), 3);
        assert_eq!(p.literal_tail_len(), 0);
    }

    #[test]
    fn test_literal_tail() {
        let p = PathPattern::parse("/v1.0/Things{id}/Locations").unwrap();
        assert_eq!(p.literal_tail_len(), "/Locations".len());
    }

    #[test]
    fn test_empty_pattern_is_valid() {
        let p = PathPattern::parse("").unwrap();
        assert!(p.is_empty());
        assert!(!p.is_parameterized());
    }

    #[test]
    fn test_nested_braces_inside_regex() {
        let p = PathPattern::parse("/codes/{id:[0-9]{3}}").unwrap();
        assert!(p.is_parameterized());
        assert_eq!(p.placeholder_count(), 2);
    }

    #[test]
    fn test_unclosed_placeholder_rejected() {
        let err = PathPattern::parse("/Things{id").unwrap_err();
        assert_eq!(
            err,
            PatternError::UnclosedPlaceholder {
                pattern: "/Things{id".to_string(),
                position: 7,
            }
        );
    }

    #[test]
    fn test_stray_close_rejected() {
        let err = PathPattern::parse("/Things}").unwrap_err();
        assert!(matches!(err, PatternError::UnexpectedClose { position: 7, .. }));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let err = PathPattern::parse("/Things/{id:[0-9}").unwrap_err();
        match err {
            PatternError::InvalidRegex { placeholder, .. } => assert_eq!(placeholder, "id"),
            other => panic!("expected InvalidRegex, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: PathPattern = serde_yaml::from_str("\"/v1.0/Things{id}\"").unwrap();
        assert_eq!(ok.as_str(), "/v1.0/Things{id}");

        let bad: Result<PathPattern, _> = serde_yaml::from_str("\"/v1.0/Things{id\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_as_plain_string() {
        let p = PathPattern::parse("{c:.*}ep3").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"{c:.*}ep3\"");
    }
}
