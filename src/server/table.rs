//! The ordered route table handed to the router-mounting side
//!
//! A [`RouteTable`] is immutable once built. Readers share it freely; a
//! rebuild produces a whole new table and [`SharedRouteTable`] swaps the
//! pointer in one step, so nobody ever observes a partially sorted table.

use super::aggregator::aggregate;
use super::registry::Registry;
use crate::core::{EntityType, HttpMethod, PathPattern, RouteConflict};
use arc_swap::ArcSwap;
use std::sync::Arc;

/// One entry of the final registration sequence
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub endpoint: String,
    pub entity_type: EntityType,
    pub method: HttpMethod,
    pub path: PathPattern,
    pub handler: H,
}

/// Receiver of routes, in registration order
///
/// Implement this for whatever first-match router the application uses.
pub trait RouteSink<H> {
    fn mount(&mut self, route: &Route<H>);
}

impl<H, F> RouteSink<H> for F
where
    F: FnMut(&Route<H>),
{
    fn mount(&mut self, route: &Route<H>) {
        self(route)
    }
}

/// Routes ordered from most to least specific
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H: Clone> RouteTable<H> {
    /// Run the full ordering pipeline over a registry
    pub fn from_registry(registry: &Registry<H>) -> Result<Self, RouteConflict> {
        let routes = aggregate(registry)?
            .into_iter()
            .map(|w| Route {
                endpoint: w.endpoint().name().to_string(),
                entity_type: w.endpoint().entity_type().clone(),
                method: w.method(),
                path: w.path().clone(),
                handler: w.handler().clone(),
            })
            .collect();

        Ok(Self { routes })
    }
}

impl<H> RouteTable<H> {
    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route<H>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// (method, pattern) pairs in order
    pub fn signatures(&self) -> Vec<(HttpMethod, &str)> {
        self.routes
            .iter()
            .map(|r| (r.method, r.path.as_str()))
            .collect()
    }

    /// Hand every route to the sink, strictly in order
    pub fn mount<S: RouteSink<H> + ?Sized>(&self, sink: &mut S) {
        for route in &self.routes {
            sink.mount(route);
        }
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<'a, H> IntoIterator for &'a RouteTable<H> {
    type Item = &'a Route<H>;
    type IntoIter = std::slice::Iter<'a, Route<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Route table that can be replaced atomically at runtime
pub struct SharedRouteTable<H> {
    current: ArcSwap<RouteTable<H>>,
}

impl<H: Clone> SharedRouteTable<H> {
    pub fn new(table: RouteTable<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(table),
        }
    }

    /// Current table; cheap and lock-free
    pub fn load(&self) -> Arc<RouteTable<H>> {
        self.current.load_full()
    }

    /// Re-run the pipeline and publish the result
    ///
    /// On conflict the previously published table stays in place.
    pub fn rebuild(&self, registry: &Registry<H>) -> Result<Arc<RouteTable<H>>, RouteConflict> {
        let table = Arc::new(RouteTable::from_registry(registry)?);
        self.current.store(table.clone());
        tracing::info!(routes = table.len(), "Route table swapped");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Endpoint;
    use HttpMethod::{Delete, Get, Post};

    fn registry(ops: &[(HttpMethod, &str)]) -> Registry<String> {
        let builder = ops.iter().fold(Endpoint::builder("Things", "Thing"), |b, (m, p)| {
            b.operation(*m, *p, format!("{} {}", m, p))
        });
        let mut registry = Registry::new();
        registry.register(builder.build().unwrap()).unwrap();
        registry
    }

    #[test]
    fn test_from_registry_copies_route_data() {
        let reg = registry(&[(Get, "/v1.0/Things"), (Get, "/v1.0/Things{id}")]);
        let table = RouteTable::from_registry(&reg).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.routes()[0];
        assert_eq!(first.endpoint, "Things");
        assert_eq!(first.entity_type.as_str(), "Thing");
        assert_eq!(first.path.as_str(), "/v1.0/Things");
        assert_eq!(first.handler, "GET /v1.0/Things");
    }

    #[test]
    fn test_mount_preserves_order() {
        let reg = registry(&[
            (Get, "/v1.0/Things{id}"),
            (Delete, "/v1.0/Things{id}"),
            (Get, "/v1.0/Things"),
            (Post, "/v1.0/Things"),
        ]);
        let table = RouteTable::from_registry(&reg).unwrap();

        let mut mounted = Vec::new();
        table.mount(&mut |route: &Route<String>| mounted.push(route.handler.clone()));

        assert_eq!(
            mounted,
            vec![
                "POST /v1.0/Things",
                "GET /v1.0/Things",
                "DELETE /v1.0/Things{id}",
                "GET /v1.0/Things{id}",
            ]
        );
    }

    struct RecordingSink(Vec<(HttpMethod, String)>);

    impl RouteSink<String> for RecordingSink {
        fn mount(&mut self, route: &Route<String>) {
            self.0.push((route.method, route.path.to_string()));
        }
    }

    #[test]
    fn test_mount_into_struct_sink() {
        let reg = registry(&[(Get, "ep1"), (Post, "ep2")]);
        let table = RouteTable::from_registry(&reg).unwrap();

        let mut sink = RecordingSink(Vec::new());
        table.mount(&mut sink);
        assert_eq!(sink.0[0], (Post, "ep2".to_string()));
        assert_eq!(sink.0.len(), table.len());
    }

    #[test]
    fn test_shared_table_swaps_on_rebuild() {
        let shared = SharedRouteTable::new(RouteTable::default());
        let before = shared.load();
        assert!(before.is_empty());

        let reg = registry(&[(Get, "ep1")]);
        shared.rebuild(&reg).unwrap();

        assert_eq!(shared.load().len(), 1);
        // Readers holding the old table keep a consistent view
        assert!(before.is_empty());
    }

    #[test]
    fn test_shared_table_keeps_old_table_on_conflict() {
        let reg = registry(&[(Get, "ep1")]);
        let shared = SharedRouteTable::new(RouteTable::from_registry(&reg).unwrap());

        let mut conflicting = Registry::new();
        for (name, entity) in [("a", "A"), ("b", "B")] {
            conflicting
                .register(
                    Endpoint::builder(name, entity)
                        .operation(Get, "ep9", name.to_string())
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }

        assert!(shared.rebuild(&conflicting).is_err());
        assert_eq!(shared.load().signatures(), vec![(Get, "ep1")]);
    }
}
