//! Flattening a registry into one ordered route sequence

use super::registry::Registry;
use super::specificity::compare;
use crate::core::{Endpoint, HttpMethod, Operation, PathPattern, RouteConflict};
use std::cmp::Ordering;

/// One endpoint paired with one of its operations
///
/// Only exists while routes are being ordered; it borrows from the registry.
#[derive(Debug)]
pub struct RouteWrapper<'a, H> {
    endpoint: &'a Endpoint<H>,
    operation: &'a Operation<H>,
}

impl<'a, H> RouteWrapper<'a, H> {
    pub fn new(endpoint: &'a Endpoint<H>, operation: &'a Operation<H>) -> Self {
        Self {
            endpoint,
            operation,
        }
    }

    pub fn endpoint(&self) -> &'a Endpoint<H> {
        self.endpoint
    }

    pub fn operation(&self) -> &'a Operation<H> {
        self.operation
    }

    pub fn method(&self) -> HttpMethod {
        self.operation.method()
    }

    pub fn path(&self) -> &'a PathPattern {
        self.operation.path()
    }

    pub fn handler(&self) -> &'a H {
        self.operation.handler()
    }
}

// Manual impls: the wrapper only holds references, so `H` needs no bounds.
impl<H> Clone for RouteWrapper<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for RouteWrapper<'_, H> {}

/// Flatten every (endpoint, operation) pair of the registry and sort them
///
/// The result holds exactly one wrapper per operation, most specific first.
/// Operations are not deduplicated: two operations with the same method and
/// pattern anywhere in the registry abort with a [`RouteConflict`].
pub fn aggregate<H>(registry: &Registry<H>) -> Result<Vec<RouteWrapper<'_, H>>, RouteConflict> {
    let mut routes: Vec<RouteWrapper<'_, H>> = registry
        .endpoints()
        .flat_map(|endpoint| {
            endpoint
                .operations()
                .iter()
                .map(move |operation| RouteWrapper::new(endpoint, operation))
        })
        .collect();

    sort_routes(&mut routes)?;

    for (position, route) in routes.iter().enumerate() {
        tracing::debug!(
            position,
            method = %route.method(),
            path = %route.path(),
            endpoint = route.endpoint().name(),
            "Route ordered"
        );
    }
    tracing::info!(
        endpoints = registry.len(),
        routes = routes.len(),
        "Routes ordered by specificity"
    );

    Ok(routes)
}

/// Sort wrappers in place by specificity
///
/// Wrappers with an identical signature end up adjacent, so the sort always
/// compares them directly and the conflict cannot go unnoticed.
pub fn sort_routes<H>(routes: &mut [RouteWrapper<'_, H>]) -> Result<(), RouteConflict> {
    let mut conflict: Option<RouteConflict> = None;

    routes.sort_by(|a, b| match compare(a, b) {
        Ok(ord) => ord,
        Err(err) => {
            conflict.get_or_insert(err);
            Ordering::Equal
        }
    });

    match conflict {
        Some(err) => {
            tracing::error!(
                method = %err.method,
                path = %err.path,
                first = %err.first_endpoint,
                second = %err.second_endpoint,
                "Two endpoints can't be the same"
            );
            Err(err)
        }
        None => Ok(()),
    }
}
