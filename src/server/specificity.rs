//! Specificity order over routes
//!
//! Sorting by [`compare`] yields routes from most specific to least specific,
//! which is the order a first-match router must try them in. Rules, first
//! decisive one wins:
//!
//! 1. A route whose pattern carries the tenant wildcard `{c:.*}` ranks after
//!    every route that does not.
//! 2. A static pattern ranks before a parameterized one.
//! 3. Fewer placeholders rank first; with equal counts (or two static
//!    patterns) the longer pattern text ranks first.
//! 4. A non-GET method ranks before GET.
//! 5. Identical pattern text with an identical method cannot be ranked and is
//!    reported as a [`RouteConflict`].
//! 6. Remaining ties: the longer literal text after the last placeholder ranks
//!    first, then byte-wise pattern order, then method declaration order.
//!
//! The rules compose lexicographically, so the order is total, irreflexive
//! and transitive.

use super::aggregator::RouteWrapper;
use crate::core::{HttpMethod, PathPattern, RouteConflict};
use std::cmp::Ordering;

/// Order two (method, pattern) signatures
///
/// Returns `Equal` only when both method and pattern text are identical.
pub fn order_signatures(
    a_method: HttpMethod,
    a: &PathPattern,
    b_method: HttpMethod,
    b: &PathPattern,
) -> Ordering {
    a.has_wildcard_prefix()
        .cmp(&b.has_wildcard_prefix())
        .then_with(|| a.is_parameterized().cmp(&b.is_parameterized()))
        .then_with(|| a.placeholder_count().cmp(&b.placeholder_count()))
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a_method.is_get().cmp(&b_method.is_get()))
        .then_with(|| fallback(a_method, a, b_method, b))
}

fn fallback(a_method: HttpMethod, a: &PathPattern, b_method: HttpMethod, b: &PathPattern) -> Ordering {
    b.literal_tail_len()
        .cmp(&a.literal_tail_len())
        .then_with(|| a.as_str().cmp(b.as_str()))
        .then_with(|| a_method.cmp(&b_method))
}

/// Compare two routes by specificity
///
/// `Ordering::Less` means `a` must be registered before `b`.
pub fn compare<H>(a: &RouteWrapper<'_, H>, b: &RouteWrapper<'_, H>) -> Result<Ordering, RouteConflict> {
    match order_signatures(a.method(), a.path(), b.method(), b.path()) {
        Ordering::Equal => Err(RouteConflict {
            method: a.method(),
            path: a.path().to_string(),
            first_endpoint: a.endpoint().name().to_string(),
            second_endpoint: b.endpoint().name().to_string(),
        }),
        ord => Ok(ord),
    }
}

/// True if `a` ranks strictly before `b`
pub fn less<H>(a: &RouteWrapper<'_, H>, b: &RouteWrapper<'_, H>) -> Result<bool, RouteConflict> {
    compare(a, b).map(|ord| ord == Ordering::Less)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Endpoint;

    fn endpoint(ops: &[(HttpMethod, &str)]) -> Endpoint<()> {
        ops.iter()
            .fold(Endpoint::builder("test", "Thing"), |b, (m, p)| b.operation(*m, *p, ()))
            .build()
            .unwrap()
    }

    fn first_wins(a: (HttpMethod, &str), b: (HttpMethod, &str)) -> bool {
        let ea = endpoint(&[a]);
        let eb = endpoint(&[b]);
        let wa = RouteWrapper::new(&ea, &ea.operations()[0]);
        let wb = RouteWrapper::new(&eb, &eb.operations()[0]);
        let forward = less(&wa, &wb).unwrap();
        let backward = less(&wb, &wa).unwrap();
        assert_ne!(forward, backward, "order must be asymmetric");
        forward
    }

    use HttpMethod::{Delete, Get, Patch, Post};

    #[test]
    fn test_wildcard_demoted_below_everything() {
        assert!(first_wins((Get, "/v1.0/Things{id}/{params}/{more}"), (Get, "{c:.*}")));
        assert!(first_wins((Get, "ep1 "), (Post, "ep1 {c:.*}")));
        assert!(first_wins((Get, "ep2longer"), (Get, "ep1 {c:.*}")));
    }

    #[test]
    fn test_static_before_parameterized() {
        assert!(first_wins((Get, "ep7"), (Post, "ep6{test}")));
        assert!(first_wins((Get, "/v1.0/Things"), (Get, "/v1.0/Things{id}")));
    }

    #[test]
    fn test_fewer_placeholders_first() {
        assert!(first_wins(
            (Get, "/v1.0/Things{id}/Locations/and/more"),
            (Get, "/v1.0/Things{id}/{params}")
        ));
    }

    #[test]
    fn test_equal_placeholders_longer_first() {
        assert!(first_wins((Get, "ep2{}longer"), (Post, "ep1{}")));
    }

    #[test]
    fn test_static_longer_first() {
        assert!(first_wins((Get, "ep2longer"), (Post, "ep1")));
    }

    #[test]
    fn test_non_get_before_get() {
        assert!(first_wins((Post, "ep2"), (Get, "ep1")));
        assert!(first_wins((Delete, "/v1.0/Things{id}"), (Get, "/v1.0/Things{id}")));
    }

    #[test]
    fn test_same_path_different_non_get_methods_are_ordered() {
        assert!(first_wins((Patch, "/v1.0/Things{id}"), (Delete, "/v1.0/Things{id}")));
    }

    #[test]
    fn test_fallback_prefers_literal_tail() {
        assert!(first_wins((Get, "{c:.*}ep3"), (Get, "ep4{c:.*}")));
    }

    #[test]
    fn test_fallback_lexical_for_static() {
        assert!(first_wins((Get, "ep1"), (Get, "ep7")));
    }

    #[test]
    fn test_identical_signature_is_conflict() {
        let e = endpoint(&[(Get, "ep1")]);
        let other: Endpoint<()> = Endpoint::builder("other", "Sensor")
            .operation(Get, "ep1", ())
            .build()
            .unwrap();
        let a = RouteWrapper::new(&e, &e.operations()[0]);
        let b = RouteWrapper::new(&other, &other.operations()[0]);

        let err = compare(&a, &b).unwrap_err();
        assert_eq!(err.method, Get);
        assert_eq!(err.path, "ep1");
        assert_eq!(err.first_endpoint, "test");
        assert_eq!(err.second_endpoint, "other");
    }

    #[test]
    fn test_order_signatures_equal_only_for_identical() {
        let p = PathPattern::parse("/v1.0/Things{id}").unwrap();
        assert_eq!(order_signatures(Get, &p, Get, &p), Ordering::Equal);
        assert_ne!(order_signatures(Get, &p, Patch, &p), Ordering::Equal);
    }
}
